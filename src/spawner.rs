//! Enemy placement.

use glam::Vec2;
use log::trace;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::Enemy;

/// Pick a uniformly random world position farther than
/// `enemy.min_spawn_distance` from `player_pos` and put a fresh enemy there.
///
/// Positions are resampled until one qualifies.  [`GameConfig::validate`]
/// guarantees the accepted region is never empty.
pub fn spawn_enemy(player_pos: Vec2, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let min_distance = config.enemy.min_spawn_distance;
    let mut attempts = 1u32;
    let pos = loop {
        let candidate = Vec2::new(
            rng.gen_range(0.0..=config.world.width),
            rng.gen_range(0.0..=config.world.height),
        );
        if candidate.distance(player_pos) > min_distance {
            break candidate;
        }
        attempts += 1;
    };
    trace!("spawned enemy at ({:.0}, {:.0}) after {attempts} draw(s)", pos.x, pos.y);
    Enemy {
        pos,
        radius: config.enemy.radius,
        speed: config.enemy.speed,
    }
}
