//! Frame driver.
//!
//! A `Session` owns the game state, the held-input state and a queue of
//! pending input events.  Front ends push events whenever they arrive and call
//! [`Session::step`] once per frame; the step drains the queue in arrival
//! order, then advances the simulation if a run is in progress.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use crate::clock::Clock;
use crate::compute::{move_player, player_shoot, special_shoot, start_game, tick};
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus};
use crate::input::{InputEvent, InputState};
use crate::render::{render_frame, Renderer};

pub struct Session {
    state: GameState,
    input: InputState,
    pending: VecDeque<InputEvent>,
    /// Viewport size in world units.
    viewport: Vec2,
}

impl Session {
    pub fn new(config: GameConfig, viewport: Vec2) -> Self {
        Self {
            state: GameState::idle(config),
            input: InputState::default(),
            pending: VecDeque::new(),
            viewport,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the game state wholesale.  Meant for tests and scripted setups.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Queue an event for the next frame.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Run one frame: apply queued input, then move the player and tick the
    /// world while running.  Returns whether the simulation advanced.
    pub fn step(&mut self, clock: &impl Clock, rng: &mut impl Rng) -> bool {
        let now = clock.now_ms();
        while let Some(event) = self.pending.pop_front() {
            self.apply(event, now, rng);
        }

        if !self.state.is_running() {
            return false;
        }
        self.state = move_player(&self.state, self.input.direction(), self.viewport);
        self.state = tick(&self.state, rng);
        true
    }

    pub fn render(&self, out: &mut dyn Renderer, clock: &impl Clock) {
        render_frame(out, &self.state, &self.input, self.viewport, clock.now_ms());
    }

    fn apply(&mut self, event: InputEvent, now: u64, rng: &mut impl Rng) {
        match event {
            InputEvent::KeyDown(key) => self.input.press(key),
            InputEvent::KeyUp(key) => self.input.release(key),
            InputEvent::PointerMoved(pos) => self.input.pointer = pos,
            InputEvent::Resize(size) => self.viewport = size,
            InputEvent::Start => {
                self.state = start_game(&self.state, self.viewport, rng);
            }
            InputEvent::SpecialFire => {
                self.state = special_shoot(&self.state, now);
            }
            InputEvent::Click(pos) => {
                self.input.pointer = pos;
                self.state = match self.state.status {
                    GameStatus::Idle | GameStatus::GameOver => {
                        start_game(&self.state, self.viewport, rng)
                    }
                    GameStatus::Running => {
                        let target = self.input.pointer_world(self.state.camera);
                        player_shoot(&self.state, target, now)
                    }
                };
            }
        }
    }
}
