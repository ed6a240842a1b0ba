//! Protocol constants. Timestamps are Unix seconds, rates are basis points.

/// Basis-point denominator: 10 000 BPS = 100%.
pub const BPS_PRECISION: u64 = 10_000;

/// Minimum interval between two votes from one voter toward the same target.
pub const DEFAULT_COOLDOWN_SECS: i64 = 24 * 60 * 60; // 24 hours

/// Minimum interval between two decay sweeps.
pub const DEFAULT_DECAY_PERIOD_SECS: i64 = 7 * 24 * 60 * 60; // one week

/// Share of every member's points removed by one decay sweep (10%).
pub const DEFAULT_DECAY_RATE_BPS: u16 = 1_000;

/// Number of entries kept in the leaderboard snapshot.
pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 10;

/// Upper bound on the number of role tiers a board can define.
///
/// Keeps role levels within `u8` and bounds the per-user unlocked-role set.
pub const MAX_ROLE_THRESHOLDS: usize = 10;

/// Points gained by the target of an upvote (and lost on a downvote).
pub const VOTE_WEIGHT: u64 = 1;
