//! Decay engine implementing the [`DecayCalculator`] trait.
//!
//! All arithmetic is integer-only with u128 intermediates for overflow safety.
//! Results floor toward zero: a score of 1 decays to 0 at any positive rate.

use repboard_core::constants::BPS_PRECISION;
use repboard_core::error::BoardError;
use repboard_core::traits::DecayCalculator;

/// The production decay calculator.
///
/// Implements [`DecayCalculator`] with:
/// - Rate validation against [`BPS_PRECISION`]
/// - Single-step proportional decay with floor rounding
#[derive(Debug, Clone, Default)]
pub struct DecayEngine;

impl DecayEngine {
    /// Create a new DecayEngine.
    pub fn new() -> Self {
        Self
    }

    /// Apply one decay step to every score in `points`, in place.
    ///
    /// Fails without touching any element if the rate is invalid.
    pub fn decay_all(&self, points: &mut [u64], rate_bps: u16) -> Result<(), BoardError> {
        self.validate_rate(rate_bps)?;
        for p in points.iter_mut() {
            *p = self.decayed_points(*p, rate_bps)?;
        }
        Ok(())
    }
}

impl DecayCalculator for DecayEngine {
    fn validate_rate(&self, rate_bps: u16) -> Result<(), BoardError> {
        if rate_bps as u64 > BPS_PRECISION {
            return Err(BoardError::InvalidDecayRate(rate_bps));
        }
        Ok(())
    }

    fn decayed_points(&self, points: u64, rate_bps: u16) -> Result<u64, BoardError> {
        self.validate_rate(rate_bps)?;
        if points == 0 || rate_bps == 0 {
            return Ok(points);
        }

        // retention = (BPS_PRECISION - rate) / BPS_PRECISION
        let retention = BPS_PRECISION - rate_bps as u64;

        // remaining = points * retention / BPS_PRECISION
        let remaining = (points as u128)
            .checked_mul(retention as u128)
            .ok_or(BoardError::ArithmeticOverflow)?
            / BPS_PRECISION as u128;

        u64::try_from(remaining).map_err(|_| BoardError::ArithmeticOverflow)
    }
}
