//! Trait interfaces for the Repboard ledger.
//!
//! These traits define the contracts between crates and external collaborators:
//! - [`TokenOracle`] — token holdings lookup (external custody layer; the
//!   engine ships an in-memory implementation)
//! - [`DecayCalculator`] — decay math engine (repboard-decay implements)

use crate::error::{BoardError, OracleError};
use crate::types::{Identity, TokenId};

/// Answers "balance of token T held by identity I" at call time.
///
/// The board consults the oracle once per vote, before any state changes.
pub trait TokenOracle: Send + Sync {
    /// Current balance of `token` held by `owner`. Unknown holders have zero.
    fn balance_of(&self, token: &TokenId, owner: &Identity) -> Result<u64, OracleError>;

    /// Whether `owner` holds at least `minimum` of `token`.
    ///
    /// Default implementation delegates to [`balance_of`](Self::balance_of).
    fn meets_minimum(
        &self,
        token: &TokenId,
        owner: &Identity,
        minimum: u64,
    ) -> Result<bool, OracleError> {
        Ok(self.balance_of(token, owner)? >= minimum)
    }
}

/// Pure computation of proportional point decay.
///
/// Rates are in basis points. All math is integer-only and floors toward zero.
pub trait DecayCalculator: Send + Sync {
    /// Check that `rate_bps` is a usable decay rate.
    fn validate_rate(&self, rate_bps: u16) -> Result<(), BoardError>;

    /// Points remaining after one decay step: `floor(points * (1 - rate))`.
    fn decayed_points(&self, points: u64, rate_bps: u16) -> Result<u64, BoardError>;

    /// Points removed by one decay step.
    ///
    /// Default implementation: `points - decayed_points(...)`.
    fn decay_amount(&self, points: u64, rate_bps: u16) -> Result<u64, BoardError> {
        let remaining = self.decayed_points(points, rate_bps)?;
        points
            .checked_sub(remaining)
            .ok_or(BoardError::ArithmeticOverflow)
    }
}
