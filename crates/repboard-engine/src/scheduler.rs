//! Periodic decay sweep over every member.
//!
//! The sweep holds the board gate exclusively, so it observes and rewrites
//! the whole member set as one atomic step.

use tracing::info;

use repboard_core::error::BoardError;
use repboard_core::events::BoardEvent;
use repboard_core::traits::DecayCalculator;

use crate::board::Board;

impl Board {
    /// Apply one decay step to every member, if a full period has elapsed.
    pub fn apply_decay(&self, now: i64) -> Result<BoardEvent, BoardError> {
        let mut params = self.params.write();
        params.schedule.check_due(now)?;

        let rate = self.settings.decay_rate_bps;
        let periods = params.schedule.periods_elapsed(now);
        let changed = self
            .registry
            .rewrite_points(|points| self.decay.decayed_points(points, rate))?;
        params.schedule.mark_applied(now);

        let mut lb = self.leaderboard.lock();
        lb.rebuild(self.registry.scores());

        info!(
            now,
            rate_bps = rate,
            periods_elapsed = periods,
            changed,
            leaderboard = lb.len(),
            "decay applied"
        );
        Ok(BoardEvent::DecayApplied {
            timestamp: now,
            decay_rate: rate,
        })
    }

    /// Earliest timestamp at which [`apply_decay`](Self::apply_decay) succeeds.
    pub fn next_decay_at(&self) -> i64 {
        self.params.read().schedule.next_due()
    }
}
