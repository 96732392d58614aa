//! Minimum-interval gates for the two fire actions.
//!
//! Timestamps are milliseconds from a [`Clock`](crate::clock::Clock).  A gate
//! that has never fired is always ready, whatever the clock reads.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CooldownGate {
    pub duration_ms: u64,
    pub last_fired: Option<u64>,
}

impl CooldownGate {
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms, last_fired: None }
    }

    fn elapsed(&self, now: u64) -> Option<u64> {
        self.last_fired.map(|last| now.saturating_sub(last))
    }

    pub fn is_ready(&self, now: u64) -> bool {
        self.elapsed(now)
            .map(|elapsed| elapsed >= self.duration_ms)
            .unwrap_or(true)
    }

    /// Returns `true` and stamps `now` if the gate was ready.  A rejected
    /// trigger leaves the gate untouched.
    pub fn try_trigger(&mut self, now: u64) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_fired = Some(now);
        true
    }

    /// Share of the cooldown still to wait: `1.0` right after firing, `0.0`
    /// once ready.
    pub fn remaining_fraction(&self, now: u64) -> f32 {
        match self.elapsed(now) {
            None => 0.0,
            Some(elapsed) => {
                let remaining = self.duration_ms.saturating_sub(elapsed);
                remaining as f32 / self.duration_ms as f32
            }
        }
    }
}

/// The primary-fire and special-fire gates of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cooldowns {
    pub shoot: CooldownGate,
    pub special: CooldownGate,
}

impl Cooldowns {
    pub fn new(shoot_ms: u64, special_ms: u64) -> Self {
        Self {
            shoot: CooldownGate::new(shoot_ms),
            special: CooldownGate::new(special_ms),
        }
    }
}
