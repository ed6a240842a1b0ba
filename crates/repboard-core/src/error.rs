//! Error types for the Repboard ledger.
//!
//! Every failure of a board operation is a [`BoardError`]. Each variant maps to
//! a stable numeric [`code`](BoardError::code) for programmatic consumers and
//! to an [`ErrorKind`] describing which class of check rejected the call.
use thiserror::Error;

use crate::types::Identity;

/// Classification of board errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authorization,
    Eligibility,
    RateLimit,
    Timing,
    NotFound,
    AlreadyExists,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("token holdings unavailable: {0}")] Unavailable(String),
    #[error("unknown token: {0}")] UnknownToken(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("invalid hex: {0}")] InvalidHex(String),
    #[error("invalid length: expected 32 bytes, got {0}")] InvalidLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Insufficient token balance to vote: have {have}, need {need}")] InsufficientTokenBalance { have: u64, need: u64 },
    #[error("Cooldown period is still active: {remaining_secs}s remaining")] CooldownActive { remaining_secs: i64 },
    #[error("Unauthorized admin action")] UnauthorizedAdmin,
    #[error("Decay can only be applied once per period: {remaining_secs}s remaining")] DecayTooEarly { remaining_secs: i64 },
    #[error("Invalid role threshold: {0}")] InvalidRoleThreshold(String),
    #[error("identity not registered: {0}")] NotFound(Identity),
    #[error("identity already registered: {0}")] AlreadyRegistered(Identity),
    #[error("cannot vote for yourself")] SelfVote,
    #[error("decay rate out of range: {0} bps")] InvalidDecayRate(u16),
    #[error("invalid board settings: {0}")] InvalidSettings(String),
    #[error("token oracle failure: {0}")] Oracle(#[from] OracleError),
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

impl BoardError {
    /// Stable numeric error code. Codes never change once assigned.
    pub fn code(&self) -> u32 {
        match self {
            Self::InsufficientTokenBalance { .. } => 6000,
            Self::CooldownActive { .. } => 6001,
            Self::UnauthorizedAdmin => 6002,
            Self::DecayTooEarly { .. } => 6003,
            Self::InvalidRoleThreshold(_) => 6004,
            Self::NotFound(_) => 6005,
            Self::AlreadyRegistered(_) => 6006,
            Self::SelfVote => 6007,
            Self::InvalidDecayRate(_) => 6008,
            Self::InvalidSettings(_) => 6009,
            Self::Oracle(_) => 6010,
            Self::ArithmeticOverflow => 6011,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientTokenBalance { .. } | Self::Oracle(_) => ErrorKind::Eligibility,
            Self::CooldownActive { .. } => ErrorKind::RateLimit,
            Self::UnauthorizedAdmin => ErrorKind::Authorization,
            Self::DecayTooEarly { .. } => ErrorKind::Timing,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyRegistered(_) => ErrorKind::AlreadyExists,
            Self::InvalidRoleThreshold(_)
            | Self::SelfVote
            | Self::InvalidDecayRate(_)
            | Self::InvalidSettings(_)
            | Self::ArithmeticOverflow => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_errors() -> Vec<BoardError> {
        let id = Identity::from_label("someone");
        vec![
            BoardError::InsufficientTokenBalance { have: 1, need: 2 },
            BoardError::CooldownActive { remaining_secs: 10 },
            BoardError::UnauthorizedAdmin,
            BoardError::DecayTooEarly { remaining_secs: 10 },
            BoardError::InvalidRoleThreshold("empty".into()),
            BoardError::NotFound(id),
            BoardError::AlreadyRegistered(id),
            BoardError::SelfVote,
            BoardError::InvalidDecayRate(20_000),
            BoardError::InvalidSettings("zero capacity".into()),
            BoardError::Oracle(OracleError::Unavailable("down".into())),
            BoardError::ArithmeticOverflow,
        ]
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<u32> = all_errors().iter().map(BoardError::code).collect();
        assert_eq!(codes.len(), all_errors().len());
    }

    #[test]
    fn messages_match_legacy_wording() {
        let msg = BoardError::CooldownActive { remaining_secs: 5 }.to_string();
        assert!(msg.contains("Cooldown period is still active"));
        assert!(BoardError::UnauthorizedAdmin.to_string().contains("Unauthorized admin action"));
    }

    #[test]
    fn oracle_error_converts() {
        let err: BoardError = OracleError::UnknownToken("abc".into()).into();
        assert_eq!(err.code(), 6010);
        assert_eq!(err.kind(), ErrorKind::Eligibility);
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(BoardError::SelfVote.kind(), ErrorKind::Validation);
        assert_eq!(BoardError::UnauthorizedAdmin.kind(), ErrorKind::Authorization);
        assert_eq!(
            BoardError::CooldownActive { remaining_secs: 1 }.kind(),
            ErrorKind::RateLimit
        );
        assert_eq!(
            BoardError::DecayTooEarly { remaining_secs: 1 }.kind(),
            ErrorKind::Timing
        );
    }
}
