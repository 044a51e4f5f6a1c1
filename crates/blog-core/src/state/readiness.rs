//! Readiness state machine - gates the application until the backend answers
//!
//! Transitions are driven by two independent clocks (health-check interval and
//! the one-second countdown) plus health-check results. The driver that owns
//! the timers lives in the service layer; this type only holds the rules.

use serde::Serialize;

/// Default length of one countdown cycle in seconds
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 120;

/// Connection phase shown while the application starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessPhase {
    #[default]
    Connecting,
    /// A countdown cycle elapsed without a successful health check
    Retrying,
    Connected,
}

/// Readiness gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessState {
    pub phase: ReadinessPhase,
    pub countdown_seconds: u32,
    pub countdown_duration: u32,
    /// Health checks issued so far
    pub attempts: u64,
}

impl Default for ReadinessState {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECONDS)
    }
}

impl ReadinessState {
    /// Initial state with a full countdown
    pub fn new(countdown_duration: u32) -> Self {
        let countdown_duration = countdown_duration.max(1);
        Self {
            phase: ReadinessPhase::Connecting,
            countdown_seconds: countdown_duration,
            countdown_duration,
            attempts: 0,
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.phase == ReadinessPhase::Connected
    }

    /// Whether the driver should keep polling
    #[inline]
    pub fn should_poll(&self) -> bool {
        !self.is_connected()
    }

    /// Record a health check being issued
    pub fn record_attempt(&mut self) {
        if self.should_poll() {
            self.attempts = self.attempts.saturating_add(1);
        }
    }

    /// One-second countdown tick.
    ///
    /// Returns `true` when the countdown hit zero and a new retry cycle started.
    pub fn tick_countdown(&mut self) -> bool {
        if self.is_connected() {
            return false;
        }
        self.countdown_seconds = self.countdown_seconds.saturating_sub(1);
        if self.countdown_seconds == 0 {
            self.phase = ReadinessPhase::Retrying;
            self.countdown_seconds = self.countdown_duration;
            return true;
        }
        false
    }

    /// Apply a health-check result. Failures leave the phase untouched.
    ///
    /// Returns `true` on the transition to `Connected`.
    pub fn on_health_result(&mut self, healthy: bool) -> bool {
        if !healthy || self.is_connected() {
            return false;
        }
        self.phase = ReadinessPhase::Connected;
        true
    }
}
