use homing_survival::clock::{Clock, ManualClock};
use homing_survival::cooldown::*;

#[test]
fn fresh_gate_is_ready_at_time_zero() {
    let gate = CooldownGate::new(500);
    assert!(gate.is_ready(0));
    assert_eq!(gate.remaining_fraction(0), 0.0);
}

#[test]
fn trigger_stamps_and_blocks_until_duration_passes() {
    let mut gate = CooldownGate::new(500);
    assert!(gate.try_trigger(100));
    assert_eq!(gate.last_fired, Some(100));
    assert!(!gate.try_trigger(599));
    // a rejected trigger leaves the stamp alone
    assert_eq!(gate.last_fired, Some(100));
    assert!(gate.try_trigger(600));
    assert_eq!(gate.last_fired, Some(600));
}

#[test]
fn remaining_fraction_counts_down() {
    let mut gate = CooldownGate::new(500);
    gate.try_trigger(1_000);
    assert_eq!(gate.remaining_fraction(1_000), 1.0);
    assert_eq!(gate.remaining_fraction(1_250), 0.5);
    assert_eq!(gate.remaining_fraction(1_500), 0.0);
    assert_eq!(gate.remaining_fraction(9_000), 0.0);
}

#[test]
fn clock_going_backwards_is_treated_as_no_time_passed() {
    let mut gate = CooldownGate::new(500);
    gate.try_trigger(1_000);
    assert!(!gate.is_ready(900));
    assert_eq!(gate.remaining_fraction(900), 1.0);
}

#[test]
fn gates_are_independent() {
    let mut cds = Cooldowns::new(500, 60_000);
    assert!(cds.special.try_trigger(0));
    assert!(cds.shoot.try_trigger(0));
    assert!(cds.shoot.try_trigger(500));
    assert!(!cds.special.try_trigger(500));
}

#[test]
fn manual_clock_never_runs_backwards() {
    let clock = ManualClock::new(100);
    clock.advance(50);
    assert_eq!(clock.now_ms(), 150);
    clock.set(120);
    assert_eq!(clock.now_ms(), 150);
    clock.set(400);
    assert_eq!(clock.now_ms(), 400);
}
