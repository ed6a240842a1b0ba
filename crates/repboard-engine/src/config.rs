//! Board tunables.
//!
//! Provides [`BoardSettings`] with defaults for the cooldown window, decay
//! cadence and leaderboard size. Settings can be built programmatically,
//! deserialized (missing fields take defaults), or overridden from
//! `REPBOARD_*` environment variables.

use serde::{Deserialize, Serialize};

use repboard_core::constants::{
    BPS_PRECISION, DEFAULT_COOLDOWN_SECS, DEFAULT_DECAY_PERIOD_SECS, DEFAULT_DECAY_RATE_BPS,
    DEFAULT_LEADERBOARD_CAPACITY,
};
use repboard_core::error::BoardError;

pub const ENV_COOLDOWN_SECS: &str = "REPBOARD_COOLDOWN_SECS";
pub const ENV_DECAY_PERIOD_SECS: &str = "REPBOARD_DECAY_PERIOD_SECS";
pub const ENV_DECAY_RATE_BPS: &str = "REPBOARD_DECAY_RATE_BPS";
pub const ENV_LEADERBOARD_CAPACITY: &str = "REPBOARD_LEADERBOARD_CAPACITY";

/// Tunables fixed for the lifetime of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Minimum seconds between votes from one voter on the same target.
    pub cooldown_secs: i64,
    /// Minimum seconds between decay sweeps.
    pub decay_period_secs: i64,
    /// Share of points removed per sweep, in basis points (0–10 000).
    pub decay_rate_bps: u16,
    /// Number of leaderboard entries kept.
    pub leaderboard_capacity: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            decay_period_secs: DEFAULT_DECAY_PERIOD_SECS,
            decay_rate_bps: DEFAULT_DECAY_RATE_BPS,
            leaderboard_capacity: DEFAULT_LEADERBOARD_CAPACITY,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: String) -> Result<T, BoardError> {
    raw.trim()
        .parse()
        .map_err(|_| BoardError::InvalidSettings(format!("{name} must be an integer, got {raw:?}")))
}

impl BoardSettings {
    /// Defaults overridden by any `REPBOARD_*` environment variables present.
    pub fn from_env() -> Result<Self, BoardError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(raw) = lookup(ENV_COOLDOWN_SECS) {
            settings.cooldown_secs = parse_var(ENV_COOLDOWN_SECS, raw)?;
        }
        if let Some(raw) = lookup(ENV_DECAY_PERIOD_SECS) {
            settings.decay_period_secs = parse_var(ENV_DECAY_PERIOD_SECS, raw)?;
        }
        if let Some(raw) = lookup(ENV_DECAY_RATE_BPS) {
            settings.decay_rate_bps = parse_var(ENV_DECAY_RATE_BPS, raw)?;
        }
        if let Some(raw) = lookup(ENV_LEADERBOARD_CAPACITY) {
            settings.leaderboard_capacity = parse_var(ENV_LEADERBOARD_CAPACITY, raw)?;
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the board cannot run with.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.cooldown_secs <= 0 {
            return Err(BoardError::InvalidSettings(format!(
                "cooldown_secs must be positive, got {}",
                self.cooldown_secs
            )));
        }
        if self.decay_period_secs <= 0 {
            return Err(BoardError::InvalidSettings(format!(
                "decay_period_secs must be positive, got {}",
                self.decay_period_secs
            )));
        }
        if self.decay_rate_bps as u64 > BPS_PRECISION {
            return Err(BoardError::InvalidDecayRate(self.decay_rate_bps));
        }
        if self.leaderboard_capacity == 0 {
            return Err(BoardError::InvalidSettings(
                "leaderboard_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_constants() {
        let s = BoardSettings::default();
        assert_eq!(s.cooldown_secs, 86_400);
        assert_eq!(s.decay_period_secs, 604_800);
        assert_eq!(s.decay_rate_bps, 1_000);
        assert_eq!(s.leaderboard_capacity, 10);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn lookup_overrides_selected_fields() {
        let s = BoardSettings::from_lookup(lookup(&[
            (ENV_COOLDOWN_SECS, "60"),
            (ENV_LEADERBOARD_CAPACITY, " 3 "),
        ]))
        .unwrap();
        assert_eq!(s.cooldown_secs, 60);
        assert_eq!(s.leaderboard_capacity, 3);
        assert_eq!(s.decay_rate_bps, DEFAULT_DECAY_RATE_BPS);
    }

    #[test]
    fn lookup_rejects_garbage() {
        let err = BoardSettings::from_lookup(lookup(&[(ENV_DECAY_RATE_BPS, "ten")])).unwrap_err();
        assert!(matches!(err, BoardError::InvalidSettings(_)));
    }

    #[test]
    fn lookup_rejects_out_of_range_rate() {
        let err =
            BoardSettings::from_lookup(lookup(&[(ENV_DECAY_RATE_BPS, "10001")])).unwrap_err();
        assert_eq!(err, BoardError::InvalidDecayRate(10_001));
    }

    #[test]
    fn validate_rejects_zero_capacity_and_periods() {
        let base = BoardSettings::default();
        assert!(BoardSettings { leaderboard_capacity: 0, ..base.clone() }.validate().is_err());
        assert!(BoardSettings { cooldown_secs: 0, ..base.clone() }.validate().is_err());
        assert!(BoardSettings { decay_period_secs: -1, ..base }.validate().is_err());
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let s: BoardSettings = serde_json::from_str(r#"{"cooldown_secs": 5}"#).unwrap();
        assert_eq!(s.cooldown_secs, 5);
        assert_eq!(s.decay_period_secs, DEFAULT_DECAY_PERIOD_SECS);
    }
}
