//! Role tier evaluation.
//!
//! Pure computation — no storage, no IO. A board defines an ascending list of
//! point thresholds; an identity holds role level `i` once its points reach
//! `thresholds[i]`.

use crate::constants::MAX_ROLE_THRESHOLDS;
use crate::error::BoardError;

/// Highest role level whose threshold `points` reaches, or `None`.
///
/// Never rejects input: thresholds are validated when they are set, not here.
/// For non-ascending input the result is still the highest qualifying index.
///
/// # Examples
///
/// ```
/// use repboard_core::roles::role_for;
///
/// let thresholds = [100, 500, 1000];
/// assert_eq!(role_for(0, &thresholds), None);
/// assert_eq!(role_for(99, &thresholds), None);
/// assert_eq!(role_for(100, &thresholds), Some(0));
/// assert_eq!(role_for(999, &thresholds), Some(1));
/// assert_eq!(role_for(5_000, &thresholds), Some(2));
/// ```
pub fn role_for(points: u64, thresholds: &[u64]) -> Option<u8> {
    thresholds
        .iter()
        .enumerate()
        .filter(|&(_, &threshold)| threshold <= points)
        .map(|(level, _)| level)
        .max()
        .and_then(|level| u8::try_from(level).ok())
}

/// The role level newly reached when points move from `old` to `new`.
///
/// Returns `Some(level)` only if the tier strictly increased.
///
/// # Examples
///
/// ```
/// use repboard_core::roles::tier_increase;
///
/// let thresholds = [100, 500, 1000];
/// assert_eq!(tier_increase(99, 100, &thresholds), Some(0));
/// assert_eq!(tier_increase(100, 101, &thresholds), None);
/// assert_eq!(tier_increase(101, 100, &thresholds), None);
/// ```
pub fn tier_increase(old: u64, new: u64, thresholds: &[u64]) -> Option<u8> {
    let before = role_for(old, thresholds);
    let after = role_for(new, thresholds);
    if after > before { after } else { None }
}

/// Check a threshold list before it is stored on a board.
///
/// Thresholds must be non-empty, strictly ascending, and no longer than
/// [`MAX_ROLE_THRESHOLDS`].
pub fn validate_thresholds(thresholds: &[u64]) -> Result<(), BoardError> {
    if thresholds.is_empty() {
        return Err(BoardError::InvalidRoleThreshold(
            "at least one threshold is required".into(),
        ));
    }
    if thresholds.len() > MAX_ROLE_THRESHOLDS {
        return Err(BoardError::InvalidRoleThreshold(format!(
            "{} thresholds exceeds maximum of {MAX_ROLE_THRESHOLDS}",
            thresholds.len()
        )));
    }
    if let Some(pair) = thresholds.windows(2).find(|w| w[0] >= w[1]) {
        return Err(BoardError::InvalidRoleThreshold(format!(
            "thresholds must be strictly ascending: {} then {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}
