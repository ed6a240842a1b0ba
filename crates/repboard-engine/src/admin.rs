//! Privileged board operations.
//!
//! Authorization is identity equality with the admin fixed at initialization.

use tracing::{info, warn};

use repboard_core::error::BoardError;
use repboard_core::events::BoardEvent;
use repboard_core::roles::validate_thresholds;
use repboard_core::types::Identity;

use crate::board::Board;

impl Board {
    fn require_admin(&self, caller: &Identity, action: &str) -> Result<(), BoardError> {
        if *caller != self.admin {
            warn!(caller = %caller.short(), action, "admin: unauthorized attempt");
            return Err(BoardError::UnauthorizedAdmin);
        }
        Ok(())
    }

    /// Zero every member's points and clear the leaderboard.
    ///
    /// Unlocked roles and cooldowns are left as they are.
    pub fn reset_all_scores(&self, caller: Identity) -> Result<BoardEvent, BoardError> {
        self.require_admin(&caller, "reset_all_scores")?;

        let _gate = self.params.write();
        let changed = self.registry.rewrite_points(|_| Ok(0))?;
        self.leaderboard.lock().clear();

        info!(admin = %caller.short(), changed, "all scores reset");
        Ok(BoardEvent::AllScoresReset { admin: caller })
    }

    /// Replace the role thresholds.
    ///
    /// Roles already unlocked are not recomputed against the new thresholds.
    pub fn set_role_thresholds(
        &self,
        caller: Identity,
        new_thresholds: Vec<u64>,
    ) -> Result<BoardEvent, BoardError> {
        self.require_admin(&caller, "set_role_thresholds")?;
        validate_thresholds(&new_thresholds)?;

        let mut params = self.params.write();
        info!(
            admin = %caller.short(),
            old = ?params.role_thresholds,
            new = ?new_thresholds,
            "role thresholds updated"
        );
        params.role_thresholds = new_thresholds;
        Ok(BoardEvent::RoleThresholdsUpdated { admin: caller })
    }
}
