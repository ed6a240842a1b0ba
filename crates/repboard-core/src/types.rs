//! Core ledger types: identities, per-identity records, board configuration.
//!
//! Points are `u64` and never negative. Timestamps are `i64` Unix seconds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::constants::VOTE_WEIGHT;
use crate::error::KeyParseError;

/// Defines a 32-byte opaque key type ordered lexicographically by bytes,
/// displayed and serialized as lowercase hex.
macro_rules! key_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            /// Create a key from raw bytes.
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Derive a deterministic key from a human-readable label.
            ///
            /// The key is the BLAKE3 hash of the label, so the same label always
            /// names the same key.
            pub fn from_label(label: &str) -> Self {
                Self(blake3::hash(label.as_bytes()).into())
            }

            /// Return the underlying bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Short hex prefix for log lines.
            pub fn short(&self) -> String {
                hex::encode(&self.0[..4])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = KeyParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s).map_err(|e| KeyParseError::InvalidHex(e.to_string()))?;
                let arr: [u8; 32] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| KeyParseError::InvalidLength(bytes.len()))?;
                Ok(Self(arr))
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

key_type!(
    /// An externally authenticated actor (wallet) on the board.
    Identity
);

key_type!(
    /// Identifier of the token whose holdings gate voting.
    TokenId
);

/// Reputation record for one registered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub wallet: Identity,
    /// Reputation points, floored at zero.
    pub reputation_points: u64,
    /// Role levels unlocked so far. Never shrinks.
    pub roles: BTreeSet<u8>,
    /// Timestamp of the last vote received (or registration).
    pub last_activity: i64,
}

impl UserRecord {
    pub fn new(wallet: Identity, now: i64) -> Self {
        Self {
            wallet,
            reputation_points: 0,
            roles: BTreeSet::new(),
            last_activity: now,
        }
    }

    /// Apply one vote to this record and return the new point total.
    ///
    /// Upvotes saturate at `u64::MAX`, downvotes at zero.
    pub fn apply_vote(&mut self, is_upvote: bool, now: i64) -> u64 {
        self.reputation_points = if is_upvote {
            self.reputation_points.saturating_add(VOTE_WEIGHT)
        } else {
            self.reputation_points.saturating_sub(VOTE_WEIGHT)
        };
        self.last_activity = now;
        self.reputation_points
    }

    pub fn has_role(&self, level: u8) -> bool {
        self.roles.contains(&level)
    }
}

/// Voting history for one registered identity, used for cooldown checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub wallet: Identity,
    /// Target → timestamp of this voter's last vote on it.
    pub cooldowns: BTreeMap<Identity, i64>,
    pub total_votes_cast: u64,
    /// Timestamp of the most recent vote, `0` if none was ever cast.
    pub last_vote_timestamp: i64,
}

impl VoterRecord {
    pub fn new(wallet: Identity) -> Self {
        Self {
            wallet,
            cooldowns: BTreeMap::new(),
            total_votes_cast: 0,
            last_vote_timestamp: 0,
        }
    }

    /// Seconds until this voter may vote on `target` again; `0` if allowed now.
    ///
    /// A `now` earlier than the recorded vote counts as inside the window.
    pub fn cooldown_remaining(&self, target: &Identity, now: i64, cooldown_secs: i64) -> i64 {
        match self.cooldowns.get(target) {
            Some(&last) => {
                let elapsed = now.saturating_sub(last);
                if elapsed < cooldown_secs {
                    cooldown_secs.saturating_sub(elapsed)
                } else {
                    0
                }
            }
            None => 0,
        }
    }

    /// Record a vote on `target` at `now`.
    pub fn record_vote(&mut self, target: Identity, now: i64) {
        self.cooldowns.insert(target, now);
        self.total_votes_cast = self.total_votes_cast.saturating_add(1);
        self.last_vote_timestamp = now;
    }
}

/// One row of the leaderboard snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub wallet: Identity,
    pub points: u64,
}

impl LeaderboardEntry {
    pub fn new(wallet: Identity, points: u64) -> Self {
        Self { wallet, points }
    }
}

/// Aggregate board configuration together with the current leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Fixed at initialization; there is no rotation path.
    pub admin: Identity,
    pub required_token: TokenId,
    pub min_token_balance: u64,
    /// Strictly ascending, non-empty.
    pub role_thresholds: Vec<u64>,
    pub last_decay_timestamp: i64,
    pub total_members: u64,
    pub cooldown_secs: i64,
    pub decay_period_secs: i64,
    pub decay_rate_bps: u16,
    pub leaderboard_capacity: usize,
    pub leaderboard: Vec<LeaderboardEntry>,
}
