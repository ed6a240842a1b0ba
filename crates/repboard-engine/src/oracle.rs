//! In-memory token holdings.
//!
//! [`StaticHoldings`] answers [`TokenOracle`] queries from a table the host
//! fills in. It stands in for the external custody layer in tests, scenario
//! replays and embedded deployments.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use repboard_core::error::OracleError;
use repboard_core::traits::TokenOracle;
use repboard_core::types::{Identity, TokenId};

/// Token balances keyed by `(token, owner)`. Unknown holders have zero.
#[derive(Debug, Default)]
pub struct StaticHoldings {
    balances: RwLock<HashMap<(TokenId, Identity), u64>>,
}

impl StaticHoldings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`set_balance`](Self::set_balance).
    pub fn with_balance(self, token: TokenId, owner: Identity, amount: u64) -> Self {
        self.set_balance(token, owner, amount);
        self
    }

    /// Overwrite the balance of `owner` for `token`.
    pub fn set_balance(&self, token: TokenId, owner: Identity, amount: u64) {
        debug!(token = %token.short(), owner = %owner.short(), amount, "holdings: balance set");
        self.balances.write().insert((token, owner), amount);
    }

    /// Number of `(token, owner)` pairs with a recorded balance.
    pub fn len(&self) -> usize {
        self.balances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.read().is_empty()
    }
}

impl TokenOracle for StaticHoldings {
    fn balance_of(&self, token: &TokenId, owner: &Identity) -> Result<u64, OracleError> {
        Ok(self
            .balances
            .read()
            .get(&(*token, *owner))
            .copied()
            .unwrap_or(0))
    }
}
