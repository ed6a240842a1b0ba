//! Epoch gating for decay sweeps.
//!
//! A sweep is due once `now - last_decay >= period`. Timing decisions use only
//! the caller-supplied `now`; arrival order of calls is irrelevant.

use serde::{Deserialize, Serialize};
use tracing::debug;

use repboard_core::error::BoardError;

/// Tracks when the last decay sweep ran and how often sweeps are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecaySchedule {
    /// Minimum seconds between sweeps. Always positive.
    pub period_secs: i64,
    /// Timestamp of the last sweep (or board initialization).
    pub last_decay: i64,
}

impl DecaySchedule {
    pub fn new(period_secs: i64, last_decay: i64) -> Self {
        Self {
            period_secs,
            last_decay,
        }
    }

    /// Earliest timestamp at which the next sweep is allowed.
    pub fn next_due(&self) -> i64 {
        self.last_decay.saturating_add(self.period_secs)
    }

    /// Seconds until the next sweep is allowed; `0` if one is due now.
    pub fn remaining(&self, now: i64) -> i64 {
        let elapsed = now.saturating_sub(self.last_decay);
        if elapsed >= self.period_secs {
            0
        } else {
            self.period_secs.saturating_sub(elapsed)
        }
    }

    /// Number of whole periods elapsed since the last sweep.
    pub fn periods_elapsed(&self, now: i64) -> u64 {
        let elapsed = now.saturating_sub(self.last_decay);
        if elapsed <= 0 || self.period_secs <= 0 {
            return 0;
        }
        (elapsed / self.period_secs) as u64
    }

    /// Fail with [`BoardError::DecayTooEarly`] unless a sweep is due at `now`.
    pub fn check_due(&self, now: i64) -> Result<(), BoardError> {
        match self.remaining(now) {
            0 => Ok(()),
            remaining_secs => {
                debug!(now, last_decay = self.last_decay, remaining_secs, "decay: not yet due");
                Err(BoardError::DecayTooEarly { remaining_secs })
            }
        }
    }

    /// Record a sweep at `now`.
    pub fn mark_applied(&mut self, now: i64) {
        self.last_decay = now;
    }
}
