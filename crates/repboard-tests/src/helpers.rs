//! Shared helpers for integration tests.

use std::sync::Arc;

use repboard_core::leaderboard::LeaderboardIndex;
use repboard_core::types::{Identity, LeaderboardEntry, TokenId};
use repboard_engine::{Board, BoardInit, BoardSettings, StaticHoldings};

/// Board creation time used by every scenario.
pub const T0: i64 = 1_700_000_000;
pub const DAY: i64 = 24 * 60 * 60;
pub const WEEK: i64 = 7 * DAY;

pub const MIN_BALANCE: u64 = 1_000;
pub const THRESHOLDS: [u64; 3] = [100, 500, 1_000];

pub fn id(label: &str) -> Identity {
    Identity::from_label(label)
}

pub fn admin() -> Identity {
    id("admin")
}

pub fn token() -> TokenId {
    TokenId::from_label("REP")
}

/// A board plus a handle on its token holdings.
pub struct Harness {
    pub board: Board,
    pub holdings: Arc<StaticHoldings>,
}

impl Harness {
    /// Board with the default thresholds and minimum balance.
    pub fn new(settings: BoardSettings) -> Self {
        let holdings = Arc::new(StaticHoldings::new());
        let init = BoardInit {
            admin: admin(),
            required_token: token(),
            min_token_balance: MIN_BALANCE,
            role_thresholds: THRESHOLDS.to_vec(),
        };
        let (board, _) = Board::initialize(init, settings, holdings.clone(), T0).unwrap();
        Self { board, holdings }
    }

    /// Register `label` holding `balance` of the board token.
    pub fn member(&self, label: &str, balance: u64) -> Identity {
        let who = id(label);
        self.holdings.set_balance(token(), who, balance);
        self.board.register_identity(who, T0).unwrap();
        who
    }

    /// Register `{prefix}0..{prefix}{n}`, each funded well above the minimum.
    pub fn members(&self, prefix: &str, n: usize) -> Vec<Identity> {
        (0..n)
            .map(|i| self.member(&format!("{prefix}{i}"), 5 * MIN_BALANCE))
            .collect()
    }

    /// Leaderboard rebuilt from scratch over `wallets`' current points.
    pub fn expected_leaderboard(&self, wallets: &[Identity]) -> Vec<LeaderboardEntry> {
        let mut index = LeaderboardIndex::new(self.board.settings().leaderboard_capacity);
        index.rebuild(
            wallets
                .iter()
                .filter_map(|w| self.board.points(w).map(|p| (*w, p))),
        );
        index.snapshot()
    }
}

/// Assert leaderboard entries are ordered by points descending.
pub fn assert_ordered(entries: &[LeaderboardEntry]) {
    for pair in entries.windows(2) {
        assert!(
            pair[0].points >= pair[1].points,
            "leaderboard out of order: {pair:?}"
        );
    }
}
