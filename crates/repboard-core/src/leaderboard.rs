//! Bounded, sorted top-N index of reputation scores.
//!
//! The index provides:
//! - O(log n) position lookup via binary search on `(points desc, wallet asc)`
//! - Bounded storage with lowest-entry eviction
//! - Full re-derivation from the authoritative record set ([`LeaderboardIndex::rebuild`])
//!
//! Entries are a snapshot, not the source of truth. Only identities with a
//! positive score are held. When a resident entry drops to the tail of a full
//! index (or leaves it), an identity outside the index may now outrank it; the
//! index cannot know, so it flags itself [stale](LeaderboardIndex::is_stale)
//! and the owner must rebuild it before serving a snapshot.
//!
//! Not thread-safe — callers should wrap in a `Mutex` if concurrent access is
//! needed.

use std::cmp::{Ordering, Reverse};

use crate::types::{Identity, LeaderboardEntry};

/// Result of a single [`LeaderboardIndex::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The identity was not resident and now is. `evicted` names the entry
    /// pushed out of a full index, if any.
    Entered { evicted: Option<Identity> },
    /// A resident entry changed score and was re-positioned.
    Moved,
    /// A resident entry dropped to zero points and was removed.
    Removed,
    /// The identity does not qualify; the snapshot is unchanged.
    Ignored,
}

fn rank_key(entry: &LeaderboardEntry) -> (Reverse<u64>, Identity) {
    (Reverse(entry.points), entry.wallet)
}

fn rank_cmp(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    rank_key(a).cmp(&rank_key(b))
}

/// Top-N leaderboard ordered by points descending, ties by identity ascending.
#[derive(Debug, Clone)]
pub struct LeaderboardIndex {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
    stale: bool,
}

impl LeaderboardIndex {
    /// Create an empty index holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            stale: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Whether the index may be missing an identity that outranks its tail.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Current entries, best first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Owned copy of the current entries, best first.
    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        self.entries.clone()
    }

    /// Zero-based rank of `wallet`, if resident.
    pub fn rank_of(&self, wallet: &Identity) -> Option<usize> {
        self.entries.iter().position(|e| e.wallet == *wallet)
    }

    pub fn contains(&self, wallet: &Identity) -> bool {
        self.rank_of(wallet).is_some()
    }

    fn insertion_point(&self, entry: &LeaderboardEntry) -> usize {
        self.entries
            .binary_search_by(|probe| rank_cmp(probe, entry))
            .unwrap_or_else(|pos| pos)
    }

    /// Insert or re-position `wallet` with its new point total.
    pub fn upsert(&mut self, wallet: Identity, points: u64) -> Upsert {
        let was_full = self.is_full();

        if let Some(idx) = self.rank_of(&wallet) {
            let old = self.entries.remove(idx);
            if points == 0 {
                if was_full {
                    self.stale = true;
                }
                return Upsert::Removed;
            }
            let entry = LeaderboardEntry::new(wallet, points);
            let pos = self.insertion_point(&entry);
            self.entries.insert(pos, entry);
            if was_full && points < old.points && pos + 1 == self.entries.len() {
                self.stale = true;
            }
            return Upsert::Moved;
        }

        if points == 0 {
            return Upsert::Ignored;
        }

        let entry = LeaderboardEntry::new(wallet, points);
        let pos = self.insertion_point(&entry);
        if pos >= self.capacity {
            return Upsert::Ignored;
        }
        self.entries.insert(pos, entry);
        let evicted = if self.entries.len() > self.capacity {
            self.entries.pop().map(|e| e.wallet)
        } else {
            None
        };
        Upsert::Entered { evicted }
    }

    /// Re-derive the index from the full `(wallet, points)` record set.
    ///
    /// Clears the stale flag.
    pub fn rebuild<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = (Identity, u64)>,
    {
        let mut all: Vec<LeaderboardEntry> = records
            .into_iter()
            .filter(|&(_, points)| points > 0)
            .map(|(wallet, points)| LeaderboardEntry::new(wallet, points))
            .collect();
        all.sort_unstable_by(rank_cmp);
        all.truncate(self.capacity);
        self.entries = all;
        self.stale = false;
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stale = false;
    }
}
