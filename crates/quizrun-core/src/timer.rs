//! Countdown state and clock formatting.
//!
//! [`Countdown`] is the pure state; the once-per-second tick source lives in
//! [`crate::engine`].

use serde::{Deserialize, Serialize};

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    /// Reached zero on its own.
    Expired,
    /// Stopped by finalize or reset.
    Stopped,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running with this many seconds left.
    Running(u32),
    /// This tick brought the countdown to zero.
    Expired,
    /// The countdown was not running; nothing changed.
    Ignored,
}

/// Session countdown, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
    phase: TimerPhase,
}

impl Countdown {
    /// A countdown that has not started yet.
    pub fn idle(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            phase: TimerPhase::Idle,
        }
    }

    /// A countdown already running from `total_secs`.
    pub fn started(total_secs: u32) -> Self {
        let mut countdown = Self::idle(total_secs);
        countdown.start();
        countdown
    }

    /// Reset to the configured total and start running.
    pub fn start(&mut self) {
        self.remaining_secs = self.total_secs;
        self.phase = if self.total_secs == 0 {
            TimerPhase::Expired
        } else {
            TimerPhase::Running
        };
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if self.phase != TimerPhase::Running {
            return Tick::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Expired;
            Tick::Expired
        } else {
            Tick::Running(self.remaining_secs)
        }
    }

    /// Stop a running countdown. Expired or idle countdowns are left as is.
    pub fn stop(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Stopped;
        }
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn used_secs(&self) -> u32 {
        self.total_secs - self.remaining_secs
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn expired_by_timeout(&self) -> bool {
        self.phase == TimerPhase::Expired
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Format seconds as `mm:ss`. Minutes grow past two digits when needed.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
