//! Events emitted by successful board operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Identity, TokenId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    BoardInitialized {
        admin: Identity,
        required_token: TokenId,
        min_token_balance: u64,
    },
    UserInitialized {
        wallet: Identity,
    },
    VoteCast {
        voter: Identity,
        target: Identity,
        is_upvote: bool,
        new_reputation: u64,
    },
    RoleUnlocked {
        wallet: Identity,
        role_level: u8,
        reputation_points: u64,
    },
    AllScoresReset {
        admin: Identity,
    },
    DecayApplied {
        timestamp: i64,
        decay_rate: u16,
    },
    RoleThresholdsUpdated {
        admin: Identity,
    },
}

impl BoardEvent {
    /// Event name as it appears in the serialized `event` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoardInitialized { .. } => "board_initialized",
            Self::UserInitialized { .. } => "user_initialized",
            Self::VoteCast { .. } => "vote_cast",
            Self::RoleUnlocked { .. } => "role_unlocked",
            Self::AllScoresReset { .. } => "all_scores_reset",
            Self::DecayApplied { .. } => "decay_applied",
            Self::RoleThresholdsUpdated { .. } => "role_thresholds_updated",
        }
    }
}

impl fmt::Display for BoardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VoteCast { voter, target, is_upvote, new_reputation } => write!(
                f,
                "vote_cast voter={} target={} up={} points={}",
                voter.short(),
                target.short(),
                is_upvote,
                new_reputation
            ),
            Self::RoleUnlocked { wallet, role_level, reputation_points } => write!(
                f,
                "role_unlocked wallet={} role={} points={}",
                wallet.short(),
                role_level,
                reputation_points
            ),
            Self::DecayApplied { timestamp, decay_rate } => {
                write!(f, "decay_applied at={timestamp} rate_bps={decay_rate}")
            }
            other => f.write_str(other.name()),
        }
    }
}
