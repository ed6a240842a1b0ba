//! Cross-crate test suite for the reputation board.
//!
//! Scenarios drive a full [`repboard_engine::Board`] through its public API,
//! including concurrent callers, and check the resulting records, events and
//! leaderboard against independently computed expectations.

pub mod helpers;
