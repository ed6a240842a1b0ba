//! Identity registry: per-identity user and voter records.
//!
//! Records are created once by [`IdentityRegistry::register`] and never
//! deleted. Each record lives behind its own `DashMap` entry guard, so
//! operations on disjoint identities proceed in parallel while two mutations
//! of the same record serialize.
//!
//! Lock order is voter record first, then user record. Every caller that holds
//! both must take them in that order.

use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use repboard_core::error::BoardError;
use repboard_core::types::{Identity, UserRecord, VoterRecord};

#[derive(Debug, Default)]
pub struct IdentityRegistry {
    users: DashMap<Identity, UserRecord>,
    voters: DashMap<Identity, VoterRecord>,
    members: AtomicU64,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the user and voter records for `wallet`.
    pub fn register(&self, wallet: Identity, now: i64) -> Result<(), BoardError> {
        match self.voters.entry(wallet) {
            Entry::Occupied(_) => Err(BoardError::AlreadyRegistered(wallet)),
            Entry::Vacant(slot) => {
                self.users.insert(wallet, UserRecord::new(wallet, now));
                slot.insert(VoterRecord::new(wallet));
                self.members.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    pub fn is_registered(&self, wallet: &Identity) -> bool {
        self.voters.contains_key(wallet)
    }

    pub fn member_count(&self) -> u64 {
        self.members.load(Ordering::SeqCst)
    }

    /// Snapshot of the user record for `wallet`.
    pub fn user(&self, wallet: &Identity) -> Option<UserRecord> {
        self.users.get(wallet).map(|r| r.value().clone())
    }

    /// Snapshot of the voter record for `wallet`.
    pub fn voter(&self, wallet: &Identity) -> Option<VoterRecord> {
        self.voters.get(wallet).map(|r| r.value().clone())
    }

    /// Exclusive guard on a voter record. Take before any user guard.
    pub(crate) fn voter_mut(
        &self,
        wallet: &Identity,
    ) -> Result<RefMut<'_, Identity, VoterRecord>, BoardError> {
        self.voters
            .get_mut(wallet)
            .ok_or(BoardError::NotFound(*wallet))
    }

    /// Exclusive guard on a user record.
    pub(crate) fn user_mut(
        &self,
        wallet: &Identity,
    ) -> Result<RefMut<'_, Identity, UserRecord>, BoardError> {
        self.users
            .get_mut(wallet)
            .ok_or(BoardError::NotFound(*wallet))
    }

    /// Every `(wallet, points)` pair. Must not be called while holding a guard.
    pub fn scores(&self) -> Vec<(Identity, u64)> {
        self.users
            .iter()
            .map(|r| (r.wallet, r.reputation_points))
            .collect()
    }

    /// Rewrite every member's points with `f`.
    ///
    /// New values are computed for all members before any is written, so an
    /// error from `f` leaves every record untouched. Callers must hold the
    /// board's exclusive gate so no record guard is outstanding.
    pub(crate) fn rewrite_points<F>(&self, f: F) -> Result<usize, BoardError>
    where
        F: Fn(u64) -> Result<u64, BoardError>,
    {
        let updates = self
            .users
            .iter()
            .map(|r| Ok((r.wallet, f(r.reputation_points)?)))
            .collect::<Result<Vec<(Identity, u64)>, BoardError>>()?;

        let mut changed = 0;
        for (wallet, points) in updates {
            if let Some(mut user) = self.users.get_mut(&wallet) {
                if user.reputation_points != points {
                    user.reputation_points = points;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(label: &str) -> Identity {
        Identity::from_label(label)
    }

    #[test]
    fn register_creates_both_records() {
        let reg = IdentityRegistry::new();
        reg.register(id("alice"), 42).unwrap();

        let user = reg.user(&id("alice")).unwrap();
        assert_eq!(user.reputation_points, 0);
        assert!(user.roles.is_empty());
        assert_eq!(user.last_activity, 42);

        let voter = reg.voter(&id("alice")).unwrap();
        assert!(voter.cooldowns.is_empty());
        assert_eq!(voter.total_votes_cast, 0);
        assert_eq!(voter.last_vote_timestamp, 0);

        assert_eq!(reg.member_count(), 1);
        assert!(reg.is_registered(&id("alice")));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let reg = IdentityRegistry::new();
        reg.register(id("alice"), 1).unwrap();
        assert_eq!(
            reg.register(id("alice"), 2),
            Err(BoardError::AlreadyRegistered(id("alice")))
        );
        assert_eq!(reg.member_count(), 1);
        assert_eq!(reg.user(&id("alice")).unwrap().last_activity, 1);
    }

    #[test]
    fn unknown_identity_not_found() {
        let reg = IdentityRegistry::new();
        assert!(reg.user(&id("ghost")).is_none());
        assert!(matches!(reg.user_mut(&id("ghost")), Err(BoardError::NotFound(_))));
        assert!(matches!(reg.voter_mut(&id("ghost")), Err(BoardError::NotFound(_))));
    }

    #[test]
    fn rewrite_points_counts_changes() {
        let reg = IdentityRegistry::new();
        reg.register(id("a"), 0).unwrap();
        reg.register(id("b"), 0).unwrap();
        reg.user_mut(&id("a")).unwrap().reputation_points = 10;

        let changed = reg.rewrite_points(|p| Ok(p / 2)).unwrap();
        assert_eq!(changed, 1);
        assert_eq!(reg.user(&id("a")).unwrap().reputation_points, 5);
    }

    #[test]
    fn rewrite_points_is_all_or_nothing() {
        let reg = IdentityRegistry::new();
        for label in ["a", "b", "c"] {
            reg.register(id(label), 0).unwrap();
            reg.user_mut(&id(label)).unwrap().reputation_points = 7;
        }
        reg.user_mut(&id("b")).unwrap().reputation_points = 8;

        let res = reg.rewrite_points(|p| {
            if p == 8 {
                Err(BoardError::ArithmeticOverflow)
            } else {
                Ok(0)
            }
        });
        assert!(res.is_err());
        assert_eq!(reg.user(&id("a")).unwrap().reputation_points, 7);
        assert_eq!(reg.user(&id("c")).unwrap().reputation_points, 7);
    }

    #[test]
    fn concurrent_registration_counts_each_once() {
        let reg = std::sync::Arc::new(IdentityRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let reg = reg.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        // Every thread tries the same 50 identities.
                        let _ = reg.register(Identity::from_label(&format!("m{i}")), t);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(reg.member_count(), 50);
        assert_eq!(reg.scores().len(), 50);
    }
}
