//! # repboard-engine — Reputation board state machine.
//!
//! Composes the ledger components into a single [`Board`]:
//! - [`registry::IdentityRegistry`] — per-identity user and voter records
//! - [`voting`] — vote eligibility, cooldowns, role unlocks
//! - [`scheduler`] — periodic decay sweep
//! - [`admin`] — privileged reset and threshold changes
//! - [`config::BoardSettings`] — board tunables
//! - [`oracle::StaticHoldings`] — in-memory token holdings

pub mod admin;
pub mod board;
pub mod config;
pub mod oracle;
pub mod registry;
pub mod scheduler;
pub mod voting;

pub use board::{Board, BoardInit};
pub use config::BoardSettings;
pub use oracle::StaticHoldings;
pub use voting::VoteReceipt;
