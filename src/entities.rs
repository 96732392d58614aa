//! Game entity types and the session state that owns them.
//!
//! Each entity knows how to advance itself by one frame; deciding what
//! collides with what is left to [`crate::compute`].

use glam::Vec2;

use crate::config::GameConfig;
use crate::cooldown::Cooldowns;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Before the first start.
    Idle,
    Running,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Player {
    /// Step by `direction * speed`, clamped so the whole circle stays inside
    /// the world.  `direction` is deliberately not normalized.
    pub fn advance(&mut self, direction: Vec2, world: Vec2) {
        let next = self.pos + direction * self.speed;
        let min = Vec2::splat(self.radius);
        // max() keeps the clamp well-formed when the world is narrower than
        // the player.
        let max = (world - Vec2::splat(self.radius)).max(min);
        self.pos = next.clamp(min, max);
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Enemy {
    /// Move `speed` units straight toward `target`.  An enemy already sitting
    /// exactly on the target has no direction and stays put.
    pub fn advance(&mut self, target: Vec2) {
        let heading = (target - self.pos).normalize_or_zero();
        self.pos += heading * self.speed;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Fixed at creation; projectiles never re-aim.
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_out_of_bounds(&self, world: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > world.x || self.pos.y < 0.0 || self.pos.y > world.y
    }
}

/// Expanding ring centred where the player stood when it was cast.
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth: f32,
}

impl Pulse {
    pub fn advance(&mut self) {
        self.radius += self.growth;
    }

    pub fn is_finished(&self) -> bool {
        self.radius >= self.max_radius
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one game session owns.  Cloneable so the update functions in
/// [`crate::compute`] can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pulses: Vec<Pulse>,
    pub score: u32,
    pub status: GameStatus,
    pub cooldowns: Cooldowns,
    /// Top-left corner of the viewport in world coordinates.
    pub camera: Vec2,
    /// Simulated frames since the run started.
    pub frame: u64,
    pub config: GameConfig,
}

impl GameState {
    /// The pre-start state: an empty world waiting for the start action.
    pub fn idle(config: GameConfig) -> Self {
        let world = Vec2::new(config.world.width, config.world.height);
        GameState {
            player: Player {
                pos: world / 2.0,
                radius: config.player.radius,
                speed: config.player.speed,
            },
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pulses: Vec::new(),
            score: 0,
            status: GameStatus::Idle,
            cooldowns: Cooldowns::new(config.projectile.cooldown_ms, config.pulse.cooldown_ms),
            camera: Vec2::ZERO,
            frame: 0,
            config,
        }
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.config.world.width, self.config.world.height)
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
