//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the clock reading, viewport or RNG handle it needs) and
//! returns a brand-new `GameState`.  Side effects are limited to the injected
//! RNG.

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::entities::{GameState, GameStatus, Projectile, Pulse};
use crate::spawner::spawn_enemy;

// ── State machine ─────────────────────────────────────────────────────────────

/// Begin a fresh run: `Idle → Running` or `GameOver → Running`.
///
/// The player is placed at the world centre, every collection, the score and
/// both cooldowns are reset, and `enemy.initial_count` enemies are spawned.
/// Starting while already running does nothing.
pub fn start_game(state: &GameState, viewport: Vec2, rng: &mut impl Rng) -> GameState {
    if state.is_running() {
        return state.clone();
    }
    let config = state.config;
    let mut next = GameState::idle(config);
    next.status = GameStatus::Running;
    next.camera = camera_for(next.player.pos, viewport, next.world_size());
    next.enemies = (0..config.enemy.initial_count)
        .map(|_| spawn_enemy(next.player.pos, &config, rng))
        .collect();

    match state.status {
        GameStatus::GameOver => info!("restarting after final score {}", state.score),
        _ => info!("starting run with {} enemies", next.enemies.len()),
    }
    next
}

// ── Camera ────────────────────────────────────────────────────────────────────

/// Viewport top-left that centres `player_pos`, clamped to the world.  A
/// viewport larger than the world pins that axis to 0.
pub fn camera_for(player_pos: Vec2, viewport: Vec2, world: Vec2) -> Vec2 {
    let max = (world - viewport).max(Vec2::ZERO);
    (player_pos - viewport / 2.0).clamp(Vec2::ZERO, max)
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Advance the player along `direction` and re-centre the camera.
pub fn move_player(state: &GameState, direction: Vec2, viewport: Vec2) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let mut next = state.clone();
    let world = next.world_size();
    next.player.advance(direction, world);
    next.camera = camera_for(next.player.pos, viewport, world);
    next
}

/// Fire one projectile from the player toward `target` (world coordinates),
/// subject to the primary cooldown.
///
/// A target exactly on the player gives no direction: nothing is fired and
/// the cooldown is not consumed.
pub fn player_shoot(state: &GameState, target: Vec2, now: u64) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let Some(aim) = (target - state.player.pos).try_normalize() else {
        return state.clone();
    };
    let mut next = state.clone();
    if !next.cooldowns.shoot.try_trigger(now) {
        return next;
    }
    next.projectiles.push(Projectile {
        pos: state.player.pos,
        vel: aim * state.config.projectile.speed,
        radius: state.config.projectile.radius,
    });
    debug!("shot toward ({:.0}, {:.0}) at {now} ms", target.x, target.y);
    next
}

/// Cast an area pulse centred on the player, subject to the special cooldown.
pub fn special_shoot(state: &GameState, now: u64) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let mut next = state.clone();
    if !next.cooldowns.special.try_trigger(now) {
        return next;
    }
    next.pulses.push(Pulse {
        center: state.player.pos,
        radius: 0.0,
        max_radius: state.config.pulse.max_radius,
        growth: state.config.pulse.growth,
    });
    debug!("pulse cast at {now} ms");
    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A frame that ends the run still completes; every later call is a no-op
/// until the next [`start_game`].
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let config = state.config;
    let world = state.world_size();
    let player = &state.player;
    let reward = config.enemy.reward;

    let mut status = state.status;
    let mut score = state.score;

    // ── 1. Enemies home in; touching the player ends the run ─────────────────
    let mut enemies = state.enemies.clone();
    for enemy in &mut enemies {
        enemy.advance(player.pos);
        if enemy.pos.distance(player.pos) < enemy.radius + player.radius
            && status != GameStatus::GameOver
        {
            status = GameStatus::GameOver;
            info!("game over at frame {} with score {}", state.frame + 1, score);
        }
    }

    // ── 2. Projectiles fly; each removes every enemy it touches ──────────────
    let mut projectiles = Vec::with_capacity(state.projectiles.len());
    for projectile in &state.projectiles {
        let mut projectile = projectile.clone();
        projectile.advance();
        let before = enemies.len();
        enemies.retain(|e| projectile.pos.distance(e.pos) >= projectile.radius + e.radius);
        let hits = (before - enemies.len()) as u32;
        if hits > 0 {
            score += hits * reward;
            debug!("projectile destroyed {hits} enemy(ies)");
        }
        if hits == 0 && !projectile.is_out_of_bounds(world) {
            projectiles.push(projectile);
        }
    }

    // ── 3. Pulses grow; each removes every enemy inside its ring ─────────────
    let mut pulses = Vec::with_capacity(state.pulses.len());
    for pulse in &state.pulses {
        let mut pulse = pulse.clone();
        pulse.advance();
        let before = enemies.len();
        enemies.retain(|e| pulse.center.distance(e.pos) > pulse.radius);
        let hits = (before - enemies.len()) as u32;
        if hits > 0 {
            score += hits * reward;
            debug!("pulse destroyed {hits} enemy(ies)");
        }
        if !pulse.is_finished() {
            pulses.push(pulse);
        }
    }

    // ── 4. Occasional reinforcement ──────────────────────────────────────────
    if rng.gen_bool(config.enemy.spawn_chance) {
        enemies.push(spawn_enemy(player.pos, &config, rng));
    }

    GameState {
        enemies,
        projectiles,
        pulses,
        score,
        status,
        frame: state.frame + 1,
        ..state.clone()
    }
}
