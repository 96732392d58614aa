use glam::Vec2;
use homing_survival::clock::ManualClock;
use homing_survival::config::GameConfig;
use homing_survival::entities::{Enemy, GameStatus};
use homing_survival::input::{InputEvent, MoveKey};
use homing_survival::render::RecordingRenderer;
use homing_survival::Session;

use rand::rngs::StdRng;
use rand::SeedableRng;

const VIEWPORT: Vec2 = Vec2::new(1000.0, 800.0);
const CENTER: Vec2 = Vec2::new(2500.0, 2500.0);

fn new_session() -> Session {
    let mut config = GameConfig::default();
    config.enemy.spawn_chance = 0.0;
    Session::new(config, VIEWPORT)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Start a run and clear the enemies so nothing interferes.
fn started(clock: &ManualClock, rng: &mut StdRng) -> Session {
    let mut session = new_session();
    session.push(InputEvent::Start);
    session.step(clock, rng);
    session.state_mut().enemies.clear();
    session
}

// ── State machine ─────────────────────────────────────────────────────────────

#[test]
fn idle_session_does_not_simulate() {
    let clock = ManualClock::new(0);
    let mut session = new_session();
    assert!(!session.step(&clock, &mut seeded_rng()));
    assert_eq!(session.state().status, GameStatus::Idle);
    assert_eq!(session.state().frame, 0);
}

#[test]
fn click_while_idle_starts_the_run() {
    let clock = ManualClock::new(0);
    let mut session = new_session();
    session.push(InputEvent::Click(Vec2::new(100.0, 100.0)));
    assert!(session.step(&clock, &mut seeded_rng()));
    let s = session.state();
    assert_eq!(s.status, GameStatus::Running);
    assert_eq!(s.frame, 1);
    assert_eq!(s.enemies.len(), 20);
    // the starting click is not also a shot
    assert!(s.projectiles.is_empty());
}

#[test]
fn actions_before_start_are_ignored() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = new_session();
    session.push(InputEvent::SpecialFire);
    session.push(InputEvent::KeyDown(MoveKey::Left));
    session.step(&clock, &mut rng);
    assert!(session.state().pulses.is_empty());
    assert_eq!(session.state().player.pos, CENTER);

    session.push(InputEvent::Start);
    session.step(&clock, &mut rng);
    assert!(session.state().pulses.is_empty());
    assert_eq!(session.state().cooldowns.special.last_fired, None);
}

#[test]
fn game_over_freezes_until_click_restarts() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);
    session.state_mut().score = 50;
    session.state_mut().enemies.push(Enemy { pos: CENTER + Vec2::new(25.0, 0.0), radius: 10.0, speed: 2.0 });

    assert!(session.step(&clock, &mut rng));
    assert_eq!(session.state().status, GameStatus::GameOver);
    let frozen_frame = session.state().frame;

    session.push(InputEvent::KeyDown(MoveKey::Up));
    session.push(InputEvent::SpecialFire);
    assert!(!session.step(&clock, &mut rng));
    assert_eq!(session.state().frame, frozen_frame);
    assert_eq!(session.state().score, 50);
    assert!(session.state().pulses.is_empty());

    session.push(InputEvent::KeyUp(MoveKey::Up));
    session.push(InputEvent::Click(Vec2::new(10.0, 10.0)));
    assert!(session.step(&clock, &mut rng));
    let s = session.state();
    assert_eq!(s.status, GameStatus::Running);
    assert_eq!(s.score, 0);
    assert_eq!(s.enemies.len(), 20);
    assert!(s.projectiles.is_empty());
    // one frame of homing has already happened
    assert!(s.enemies.iter().all(|e| e.pos.distance(CENTER) > 500.0 - 2.0));
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn held_keys_move_player_each_frame_until_released() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);

    session.push(InputEvent::KeyDown(MoveKey::Right));
    session.push(InputEvent::KeyDown(MoveKey::Down));
    session.step(&clock, &mut rng);
    session.step(&clock, &mut rng);
    assert_eq!(session.state().player.pos, CENTER + Vec2::new(14.0, 14.0));

    session.push(InputEvent::KeyUp(MoveKey::Right));
    session.push(InputEvent::KeyUp(MoveKey::Down));
    session.step(&clock, &mut rng);
    assert_eq!(session.state().player.pos, CENTER + Vec2::new(14.0, 14.0));
}

#[test]
fn opposite_keys_cancel() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);
    session.push(InputEvent::KeyDown(MoveKey::Left));
    session.push(InputEvent::KeyDown(MoveKey::Right));
    session.step(&clock, &mut rng);
    assert_eq!(session.state().player.pos, CENTER);
}

#[test]
fn shots_are_cooldown_gated_by_the_clock() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);
    let click = InputEvent::Click(Vec2::new(900.0, 400.0));

    session.push(click);
    session.step(&clock, &mut rng);
    assert_eq!(session.state().projectiles.len(), 1);

    clock.set(400);
    session.push(click);
    session.step(&clock, &mut rng);
    assert_eq!(session.state().projectiles.len(), 1);

    clock.set(600);
    session.push(click);
    session.step(&clock, &mut rng);
    assert_eq!(session.state().projectiles.len(), 2);
}

#[test]
fn click_aims_at_world_position_under_pointer() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);
    // camera is (2000, 2100); the player sits at viewport (500, 400)
    session.push(InputEvent::Click(Vec2::new(500.0, 100.0)));
    session.step(&clock, &mut rng);
    let p = &session.state().projectiles[0];
    assert!((p.vel - Vec2::new(0.0, -10.0)).length() < 1e-4);
    assert_eq!(session.input().pointer, Vec2::new(500.0, 100.0));
}

#[test]
fn pulse_once_per_minute() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);

    session.push(InputEvent::SpecialFire);
    session.step(&clock, &mut rng);
    clock.set(30_000);
    session.push(InputEvent::SpecialFire);
    session.step(&clock, &mut rng);
    assert_eq!(session.state().pulses.len(), 1);

    clock.set(60_000);
    session.push(InputEvent::SpecialFire);
    session.step(&clock, &mut rng);
    assert_eq!(session.state().pulses.len(), 2);
}

#[test]
fn events_apply_in_arrival_order() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);
    session.push(InputEvent::KeyDown(MoveKey::Left));
    session.push(InputEvent::KeyUp(MoveKey::Left));
    session.step(&clock, &mut rng);
    assert_eq!(session.state().player.pos, CENTER);
}

#[test]
fn pointer_moves_update_input_state() {
    let mut session = new_session();
    session.push(InputEvent::PointerMoved(Vec2::new(42.0, 24.0)));
    session.step(&ManualClock::new(0), &mut seeded_rng());
    assert_eq!(session.input().pointer, Vec2::new(42.0, 24.0));
}

#[test]
fn resize_changes_viewport_and_camera() {
    let clock = ManualClock::new(0);
    let mut rng = seeded_rng();
    let mut session = started(&clock, &mut rng);
    session.push(InputEvent::Resize(Vec2::new(2000.0, 1000.0)));
    session.step(&clock, &mut rng);
    assert_eq!(session.viewport(), Vec2::new(2000.0, 1000.0));
    assert_eq!(session.state().camera, Vec2::new(1500.0, 2000.0));
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn render_goes_through_the_session() {
    let clock = ManualClock::new(0);
    let mut session = new_session();
    let mut out = RecordingRenderer::default();
    session.render(&mut out, &clock);
    assert!(out.texts().any(|t| t == "HOMING SURVIVAL"));

    session.push(InputEvent::Start);
    session.step(&clock, &mut seeded_rng());
    session.render(&mut out, &clock);
    assert!(out.texts().any(|t| t == "Score: 0"));
}
