//! Input events and the held-key state they build up.
//!
//! Front ends translate raw device events into [`InputEvent`]s and queue them
//! on the [`Session`](crate::session::Session); the session drains the queue
//! once per frame, in arrival order.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(MoveKey),
    KeyUp(MoveKey),
    /// Pointer position in viewport coordinates (world units from the
    /// viewport's top-left corner).
    PointerMoved(Vec2),
    /// Primary click at a viewport position: start, fire or restart depending
    /// on the game status.
    Click(Vec2),
    /// Area-pulse key.
    SpecialFire,
    /// Explicit start action (keyboard alternative to clicking).
    Start,
    /// New viewport size in world units.
    Resize(Vec2),
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashSet<MoveKey>,
    /// Last known pointer position in viewport coordinates.
    pub pointer: Vec2,
}

impl InputState {
    pub fn press(&mut self, key: MoveKey) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: MoveKey) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    /// Sum of the held directions.  Opposite keys cancel; diagonals are not
    /// normalized.  Screen axes: y grows downward.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_held(MoveKey::Up) {
            dir.y -= 1.0;
        }
        if self.is_held(MoveKey::Down) {
            dir.y += 1.0;
        }
        if self.is_held(MoveKey::Left) {
            dir.x -= 1.0;
        }
        if self.is_held(MoveKey::Right) {
            dir.x += 1.0;
        }
        dir
    }

    /// Pointer position in world coordinates for the given camera.
    pub fn pointer_world(&self, camera: Vec2) -> Vec2 {
        self.pointer + camera
    }
}
