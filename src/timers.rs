//! Tick sources for a running session
//!
//! Motion runs once per rendered frame; spawn and clock fire on fixed periods
//! measured by accumulating frame time. All three stop together when play ends.

use crate::consts::*;

/// Fixed-period timer driven by accumulated frame time
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period: f32,
    accumulated: f32,
    running: bool,
}

impl IntervalTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulated: 0.0,
            running: false,
        }
    }

    /// Restart from zero with a new period
    pub fn restart(&mut self, period: f32) {
        self.period = period;
        self.accumulated = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Add frame time and return how many periods elapsed (at most `MAX_CATCHUP_TICKS`)
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running || self.period <= 0.0 {
            return 0;
        }
        self.accumulated += dt.max(0.0);

        let mut fired = 0;
        while self.accumulated >= self.period && fired < MAX_CATCHUP_TICKS {
            self.accumulated -= self.period;
            fired += 1;
        }
        // Drop the backlog past the catch-up cap
        if self.accumulated >= self.period {
            self.accumulated %= self.period;
        }
        fired
    }
}

/// Ticks due this frame, in the order they are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueTicks {
    pub motion: bool,
    pub spawn: u32,
    pub clock: u32,
}

/// The three timers of a playing session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTimers {
    motion: bool,
    spawn: IntervalTimer,
    clock: IntervalTimer,
}

impl Default for SessionTimers {
    fn default() -> Self {
        Self {
            motion: false,
            spawn: IntervalTimer::new(0.0),
            clock: IntervalTimer::new(CLOCK_PERIOD),
        }
    }
}

impl SessionTimers {
    /// Start all timers for a new session
    pub fn start(&mut self, spawn_interval: f32) {
        self.motion = true;
        self.spawn.restart(spawn_interval);
        self.clock.restart(CLOCK_PERIOD);
    }

    /// Stop all timers
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("Timers stopped");
        }
        self.motion = false;
        self.spawn.stop();
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.motion || self.spawn.is_running() || self.clock.is_running()
    }

    pub fn spawn_period(&self) -> f32 {
        self.spawn.period()
    }

    /// Advance by one frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) -> DueTicks {
        DueTicks {
            motion: self.motion,
            spawn: self.spawn.advance(dt),
            clock: self.clock.advance(dt),
        }
    }
}
