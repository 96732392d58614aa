//! Drawing abstraction.
//!
//! The simulation never touches a screen.  [`render_frame`] turns a
//! [`GameState`] into a sequence of [`Shape`]s in viewport coordinates (world
//! units measured from the camera) and hands them to whatever [`Renderer`] the
//! front end supplies.

use glam::Vec2;

use crate::entities::{Enemy, GameState, GameStatus, Player, Projectile, Pulse};
use crate::input::InputState;

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Gray,
    Blue,
    Red,
    Yellow,
    Purple,
}

pub const C_BORDER: Color = Color::White;
pub const C_PLAYER: Color = Color::Blue;
pub const C_ENEMY: Color = Color::Red;
pub const C_PROJECTILE: Color = Color::Yellow;
pub const C_PULSE: Color = Color::Purple;
pub const C_SHOOT_GAUGE: Color = Color::Yellow;
pub const C_SPECIAL_GAUGE: Color = Color::Purple;
pub const C_TEXT: Color = Color::White;
pub const C_HINT: Color = Color::Gray;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, color: Color },
    StrokeRect { origin: Vec2, size: Vec2, color: Color },
    Text { pos: Vec2, text: String, color: Color, align: Align },
    /// Cooldown indicator.  `progress` is `0.0` just after firing and `1.0`
    /// when ready again.
    Gauge { pos: Vec2, progress: f32, color: Color },
    Crosshair { pos: Vec2 },
    /// Darken everything drawn so far.
    Dim,
}

/// A drawing surface.  Drawing never fails; front ends report I/O problems
/// when they present the finished frame.
pub trait Renderer {
    fn clear(&mut self);
    fn draw(&mut self, shape: &Shape);
}

/// Something that can put itself on a [`Renderer`] given the camera offset.
pub trait Draw {
    fn draw(&self, camera: Vec2, out: &mut dyn Renderer);
}

impl Draw for Player {
    fn draw(&self, camera: Vec2, out: &mut dyn Renderer) {
        out.draw(&Shape::FillCircle { center: self.pos - camera, radius: self.radius, color: C_PLAYER });
    }
}

impl Draw for Enemy {
    fn draw(&self, camera: Vec2, out: &mut dyn Renderer) {
        out.draw(&Shape::FillCircle { center: self.pos - camera, radius: self.radius, color: C_ENEMY });
    }
}

impl Draw for Projectile {
    fn draw(&self, camera: Vec2, out: &mut dyn Renderer) {
        out.draw(&Shape::FillCircle {
            center: self.pos - camera,
            radius: self.radius,
            color: C_PROJECTILE,
        });
    }
}

impl Draw for Pulse {
    fn draw(&self, camera: Vec2, out: &mut dyn Renderer) {
        out.draw(&Shape::StrokeCircle { center: self.center - camera, radius: self.radius, color: C_PULSE });
    }
}

// ── Layout (viewport units) ───────────────────────────────────────────────────

const SHOOT_GAUGE_POS: Vec2 = Vec2::new(10.0, 10.0);
const SPECIAL_GAUGE_POS: Vec2 = Vec2::new(10.0, 50.0);
const SCORE_POS: Vec2 = Vec2::new(10.0, 100.0);

pub const CONTROLS_HINT: &str = "WASD / arrows: move   click: shoot   F: pulse   Q: quit";

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame.
pub fn render_frame(
    out: &mut dyn Renderer,
    state: &GameState,
    input: &InputState,
    viewport: Vec2,
    now: u64,
) {
    out.clear();

    if state.status == GameStatus::Idle {
        draw_title(out, viewport);
        return;
    }

    let camera = state.camera;
    out.draw(&Shape::StrokeRect { origin: -camera, size: state.world_size(), color: C_BORDER });

    state.player.draw(camera, out);
    for enemy in &state.enemies {
        enemy.draw(camera, out);
    }
    for projectile in &state.projectiles {
        projectile.draw(camera, out);
    }
    for pulse in &state.pulses {
        pulse.draw(camera, out);
    }

    if state.is_running() {
        out.draw(&Shape::Crosshair { pos: input.pointer });
    }

    draw_hud(out, state, now);

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, viewport);
    }
}

fn draw_hud(out: &mut dyn Renderer, state: &GameState, now: u64) {
    let gauges = [
        (SHOOT_GAUGE_POS, &state.cooldowns.shoot, C_SHOOT_GAUGE),
        (SPECIAL_GAUGE_POS, &state.cooldowns.special, C_SPECIAL_GAUGE),
    ];
    for (pos, gate, color) in gauges {
        out.draw(&Shape::Gauge { pos, progress: 1.0 - gate.remaining_fraction(now), color });
    }
    out.draw(&Shape::Text {
        pos: SCORE_POS,
        text: format!("Score: {}", state.score),
        color: C_TEXT,
        align: Align::Left,
    });
}

fn draw_title(out: &mut dyn Renderer, viewport: Vec2) {
    let center = viewport / 2.0;
    let lines = [
        (-60.0, "HOMING SURVIVAL", C_TEXT),
        (0.0, "Press Enter or click to start", C_TEXT),
        (60.0, CONTROLS_HINT, C_HINT),
    ];
    for (dy, text, color) in lines {
        out.draw(&Shape::Text {
            pos: center + Vec2::new(0.0, dy),
            text: text.to_string(),
            color,
            align: Align::Center,
        });
    }
}

fn draw_game_over(out: &mut dyn Renderer, state: &GameState, viewport: Vec2) {
    out.draw(&Shape::Dim);
    let center = viewport / 2.0;
    let lines = [
        (-150.0, "Game Over".to_string()),
        (-50.0, format!("Final Score: {}", state.score)),
        (50.0, "Click to Restart".to_string()),
    ];
    for (dy, text) in lines {
        out.draw(&Shape::Text {
            pos: center + Vec2::new(0.0, dy),
            text,
            color: C_TEXT,
            align: Align::Center,
        });
    }
}

// ── Recording renderer ────────────────────────────────────────────────────────

/// Keeps every shape of the current frame.  Handy for tests and for headless
/// runs.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub shapes: Vec<Shape>,
}

impl RecordingRenderer {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw(&mut self, shape: &Shape) {
        self.shapes.push(shape.clone());
    }
}
