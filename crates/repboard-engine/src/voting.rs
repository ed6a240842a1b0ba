//! Vote validation and application.
//!
//! A vote passes four gates before anything is written: no self vote, both
//! identities registered, the voter holds enough of the required token, and
//! the voter's cooldown on this target has elapsed. Only then are the voter's
//! cooldown, the target's score and roles, and the leaderboard updated, all
//! while the records involved are exclusively held.

use tracing::debug;

use repboard_core::error::BoardError;
use repboard_core::events::BoardEvent;
use repboard_core::leaderboard::Upsert;
use repboard_core::roles::tier_increase;
use repboard_core::types::Identity;

use crate::board::Board;

/// Outcome of a successful vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    /// Target's points after the vote.
    pub new_reputation: u64,
    /// Role level unlocked by this vote, if any.
    pub role_unlocked: Option<u8>,
    /// Emitted events: `RoleUnlocked` (if any) followed by `VoteCast`.
    pub events: Vec<BoardEvent>,
}

impl Board {
    /// Cast a vote from `caller` on `target`.
    pub fn vote(
        &self,
        caller: Identity,
        target: Identity,
        is_upvote: bool,
        now: i64,
    ) -> Result<VoteReceipt, BoardError> {
        if caller == target {
            return Err(BoardError::SelfVote);
        }

        let params = self.params.read();
        let mut voter = self.registry.voter_mut(&caller)?;
        let mut user = self.registry.user_mut(&target)?;

        let balance = self.oracle.balance_of(&self.required_token, &caller)?;
        if balance < self.min_token_balance {
            debug!(voter = %caller.short(), balance, need = self.min_token_balance, "vote: insufficient balance");
            return Err(BoardError::InsufficientTokenBalance {
                have: balance,
                need: self.min_token_balance,
            });
        }

        let remaining_secs = voter.cooldown_remaining(&target, now, self.settings.cooldown_secs);
        if remaining_secs > 0 {
            debug!(voter = %caller.short(), target = %target.short(), remaining_secs, "vote: cooldown active");
            return Err(BoardError::CooldownActive { remaining_secs });
        }

        // All checks passed; nothing below can fail.
        voter.record_vote(target, now);
        let old_points = user.reputation_points;
        let new_reputation = user.apply_vote(is_upvote, now);

        let mut events = Vec::with_capacity(2);
        let role_unlocked = match tier_increase(old_points, new_reputation, &params.role_thresholds) {
            Some(level) if !user.has_role(level) => {
                user.roles.insert(level);
                events.push(BoardEvent::RoleUnlocked {
                    wallet: target,
                    role_level: level,
                    reputation_points: new_reputation,
                });
                Some(level)
            }
            _ => None,
        };

        let change = self.leaderboard.lock().upsert(target, new_reputation);
        if let Upsert::Entered { evicted: Some(out) } = change {
            debug!(entered = %target.short(), evicted = %out.short(), "leaderboard: eviction");
        }

        events.push(BoardEvent::VoteCast {
            voter: caller,
            target,
            is_upvote,
            new_reputation,
        });
        for ev in &events {
            debug!(%ev, "event");
        }

        Ok(VoteReceipt {
            new_reputation,
            role_unlocked,
            events,
        })
    }
}
