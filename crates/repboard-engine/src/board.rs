//! Board state: configuration, records, and leaderboard wired together.
//!
//! [`Board`] is the single entry point for every ledger operation. Each
//! operation is one atomic transition:
//! - register, vote and reads hold the configuration gate shared and lock only
//!   the records they touch
//! - decay, reset and threshold changes hold the gate exclusively
//!
//! Vote, decay and admin operations live in [`crate::voting`],
//! [`crate::scheduler`] and [`crate::admin`].

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info};

use repboard_core::error::BoardError;
use repboard_core::events::BoardEvent;
use repboard_core::leaderboard::LeaderboardIndex;
use repboard_core::roles::validate_thresholds;
use repboard_core::traits::TokenOracle;
use repboard_core::types::{
    BoardConfig, Identity, LeaderboardEntry, TokenId, UserRecord, VoterRecord,
};
use repboard_decay::{DecayEngine, DecaySchedule};

use crate::config::BoardSettings;
use crate::registry::IdentityRegistry;

/// Parameters supplied when a board is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInit {
    pub admin: Identity,
    pub required_token: TokenId,
    pub min_token_balance: u64,
    pub role_thresholds: Vec<u64>,
}

/// Configuration that admin and decay operations may change.
#[derive(Debug, Clone)]
pub(crate) struct BoardParams {
    pub(crate) role_thresholds: Vec<u64>,
    pub(crate) schedule: DecaySchedule,
}

/// A reputation board.
///
/// Shareable across threads behind an `Arc`.
pub struct Board {
    pub(crate) admin: Identity,
    pub(crate) required_token: TokenId,
    pub(crate) min_token_balance: u64,
    pub(crate) settings: BoardSettings,
    /// Gate: shared for per-record operations, exclusive for board-wide ones.
    pub(crate) params: RwLock<BoardParams>,
    pub(crate) registry: IdentityRegistry,
    pub(crate) leaderboard: Mutex<LeaderboardIndex>,
    pub(crate) oracle: Arc<dyn TokenOracle>,
    pub(crate) decay: DecayEngine,
}

impl Board {
    /// Create a board. `now` becomes the reference point for the first decay.
    pub fn initialize(
        init: BoardInit,
        settings: BoardSettings,
        oracle: Arc<dyn TokenOracle>,
        now: i64,
    ) -> Result<(Self, BoardEvent), BoardError> {
        settings.validate()?;
        validate_thresholds(&init.role_thresholds)?;

        let board = Self {
            admin: init.admin,
            required_token: init.required_token,
            min_token_balance: init.min_token_balance,
            params: RwLock::new(BoardParams {
                role_thresholds: init.role_thresholds,
                schedule: DecaySchedule::new(settings.decay_period_secs, now),
            }),
            registry: IdentityRegistry::new(),
            leaderboard: Mutex::new(LeaderboardIndex::new(settings.leaderboard_capacity)),
            oracle,
            decay: DecayEngine::new(),
            settings,
        };

        let event = BoardEvent::BoardInitialized {
            admin: board.admin,
            required_token: board.required_token,
            min_token_balance: board.min_token_balance,
        };
        info!(
            admin = %board.admin.short(),
            token = %board.required_token.short(),
            min_balance = board.min_token_balance,
            "board initialized"
        );
        Ok((board, event))
    }

    /// Register `caller` as a member.
    pub fn register_identity(&self, caller: Identity, now: i64) -> Result<BoardEvent, BoardError> {
        let _gate = self.params.read();
        self.registry.register(caller, now)?;
        info!(wallet = %caller.short(), members = self.registry.member_count(), "identity registered");
        Ok(BoardEvent::UserInitialized { wallet: caller })
    }

    /// Current top-N snapshot, best first.
    ///
    /// Rebuilds the index from the authoritative records first if an earlier
    /// score drop left it stale.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        {
            let lb = self.leaderboard.lock();
            if !lb.is_stale() {
                return lb.snapshot();
            }
        }
        let _gate = self.params.write();
        let mut lb = self.leaderboard.lock();
        if lb.is_stale() {
            lb.rebuild(self.registry.scores());
            debug!(entries = lb.len(), "leaderboard refreshed");
        }
        lb.snapshot()
    }

    /// Snapshot of the full board configuration and leaderboard.
    pub fn config(&self) -> BoardConfig {
        let leaderboard = self.leaderboard();
        let params = self.params.read();
        BoardConfig {
            admin: self.admin,
            required_token: self.required_token,
            min_token_balance: self.min_token_balance,
            role_thresholds: params.role_thresholds.clone(),
            last_decay_timestamp: params.schedule.last_decay,
            total_members: self.registry.member_count(),
            cooldown_secs: self.settings.cooldown_secs,
            decay_period_secs: self.settings.decay_period_secs,
            decay_rate_bps: self.settings.decay_rate_bps,
            leaderboard_capacity: self.settings.leaderboard_capacity,
            leaderboard,
        }
    }

    pub fn admin(&self) -> Identity {
        self.admin
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn role_thresholds(&self) -> Vec<u64> {
        self.params.read().role_thresholds.clone()
    }

    pub fn member_count(&self) -> u64 {
        self.registry.member_count()
    }

    pub fn is_registered(&self, wallet: &Identity) -> bool {
        self.registry.is_registered(wallet)
    }

    pub fn user(&self, wallet: &Identity) -> Option<UserRecord> {
        self.registry.user(wallet)
    }

    pub fn voter(&self, wallet: &Identity) -> Option<VoterRecord> {
        self.registry.voter(wallet)
    }

    /// Reputation points of `wallet`, or `None` if unregistered.
    pub fn points(&self, wallet: &Identity) -> Option<u64> {
        self.registry.user(wallet).map(|u| u.reputation_points)
    }
}
