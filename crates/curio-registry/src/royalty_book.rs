//! The royalty registry: optional per-token royalty policies.
//!
//! Last write wins; no history is kept. Absence of a policy is a normal
//! state — [`RoyaltyBook::policy_of`] returns `None`, while the strict
//! [`RoyaltyBook::royalty_info`] read surfaces it as `NoRoyaltiesSet`.

use std::collections::HashMap;

use curio_types::{AccountId, Amount, Bps, CurioError, Result, RoyaltyPolicy, TokenId};

/// Per-token royalty policies, keyed by token id.
#[derive(Debug, Default)]
pub struct RoyaltyBook {
    policies: HashMap<TokenId, RoyaltyPolicy>,
}

impl RoyaltyBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Set or replace a token's royalty policy.
    ///
    /// # Errors
    /// `InvalidAddress` on a zero receiver, `RoyaltyTooHigh` on a fraction
    /// above 10_000 bps. Author-only enforcement is the engine's job.
    pub fn set_policy(&mut self, token_id: TokenId, receiver: AccountId, fraction: Bps) -> Result<()> {
        if receiver.is_zero() {
            return Err(CurioError::InvalidAddress {
                context: "royalty receiver",
            });
        }
        if !fraction.is_valid() {
            return Err(CurioError::RoyaltyTooHigh { fraction });
        }
        self.policies
            .insert(token_id, RoyaltyPolicy::new(receiver, fraction));
        Ok(())
    }

    /// The token's policy, if one was ever set.
    #[must_use]
    pub fn policy_of(&self, token_id: TokenId) -> Option<RoyaltyPolicy> {
        self.policies.get(&token_id).copied()
    }

    /// Strict read: receiver and royalty amount for a sale at `sale_price`.
    ///
    /// # Errors
    /// `NoRoyaltiesSet` when the token has no policy.
    pub fn royalty_info(&self, token_id: TokenId, sale_price: Amount) -> Result<(AccountId, Amount)> {
        let policy = self
            .policies
            .get(&token_id)
            .ok_or(CurioError::NoRoyaltiesSet(token_id))?;
        Ok((policy.receiver, policy.royalty_on(sale_price)))
    }

    /// Number of tokens with a policy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
