//! # repboard-core
//! Foundation types, errors and traits for the Repboard reputation ledger.
//!
//! - [`roles`] — pure role-tier evaluation
//! - [`leaderboard`] — bounded top-N score index
//! - [`traits`] — collaborator contracts (token oracle, decay math)

pub mod constants;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod roles;
pub mod traits;
pub mod types;

pub use error::{BoardError, ErrorKind, OracleError};
pub use events::BoardEvent;
pub use leaderboard::{LeaderboardIndex, Upsert};
pub use types::{BoardConfig, Identity, LeaderboardEntry, TokenId, UserRecord, VoterRecord};
