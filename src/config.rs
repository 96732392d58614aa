//! Tunable game constants.
//!
//! Every field has a default, so a config file only needs to name the values
//! it overrides:
//!
//! ```toml
//! [enemy]
//! speed = 3.0
//! initial_count = 30
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { width: 5000.0, height: 5000.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f32,
    /// World units per frame along each held axis.
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { radius: 20.0, speed: 7.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub radius: f32,
    pub speed: f32,
    /// Enemies spawned when a run starts.
    pub initial_count: usize,
    /// Probability of one extra spawn per frame.
    pub spawn_chance: f64,
    /// Spawned enemies are always farther than this from the player.
    pub min_spawn_distance: f32,
    /// Score awarded per enemy destroyed.
    pub reward: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            speed: 2.0,
            initial_count: 20,
            spawn_chance: 0.02,
            min_spawn_distance: 500.0,
            reward: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub radius: f32,
    pub speed: f32,
    pub cooldown_ms: u64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self { radius: 5.0, speed: 10.0, cooldown_ms: 500 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Radius added per frame.
    pub growth: f32,
    pub max_radius: f32,
    pub cooldown_ms: u64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self { growth: 5.0, max_radius: 200.0, cooldown_ms: 60_000 }
    }
}

/// Terminal front-end settings.  Not used by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frame duration.
    pub frame_ms: u64,
    /// World units covered by one terminal column.
    pub cell_width: f32,
    /// World units covered by one terminal row (cells are about twice as tall
    /// as they are wide).
    pub cell_height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { frame_ms: 16, cell_width: 10.0, cell_height: 20.0 }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub projectile: ProjectileConfig,
    pub pulse: PulseConfig,
    pub display: DisplayConfig,
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("player.radius", self.player.radius)?;
        positive("player.speed", self.player.speed)?;
        positive("enemy.radius", self.enemy.radius)?;
        positive("enemy.speed", self.enemy.speed)?;
        positive("projectile.radius", self.projectile.radius)?;
        positive("projectile.speed", self.projectile.speed)?;
        positive("pulse.growth", self.pulse.growth)?;
        positive("pulse.max_radius", self.pulse.max_radius)?;
        positive("display.cell_width", self.display.cell_width)?;
        positive("display.cell_height", self.display.cell_height)?;

        if !(0.0..=1.0).contains(&self.enemy.spawn_chance) {
            return Err(invalid("enemy.spawn_chance", "must lie within [0, 1]"));
        }
        let min_spawn = self.enemy.min_spawn_distance;
        if !min_spawn.is_finite() || min_spawn < 0.0 {
            return Err(invalid("enemy.min_spawn_distance", "must be a finite, non-negative number"));
        }
        // Wherever the player stands, the farthest world corner is at least
        // half a diagonal away, so spawn sampling always has room to succeed.
        let half_diagonal = self.world.width.hypot(self.world.height) / 2.0;
        if self.enemy.min_spawn_distance >= half_diagonal {
            return Err(invalid(
                "enemy.min_spawn_distance",
                format!("must be smaller than half the world diagonal ({half_diagonal})"),
            ));
        }
        if self.projectile.cooldown_ms == 0 {
            return Err(invalid("projectile.cooldown_ms", "must be greater than 0"));
        }
        if self.pulse.cooldown_ms == 0 {
            return Err(invalid("pulse.cooldown_ms", "must be greater than 0"));
        }
        if self.display.frame_ms == 0 {
            return Err(invalid("display.frame_ms", "must be greater than 0"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}
