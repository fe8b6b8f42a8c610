//! Payout types: the ephemeral per-purchase split of a payment.
//!
//! A [`PayoutPlan`] is computed fresh for every purchase and never persisted.
//! Its defining invariant: the share amounts sum to the payment consumed,
//! **exactly** — truncation remainders are assigned to one designated party
//! (the author on a first sale, the seller on a resale), never dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CurioError, Result};
use crate::ids::{AccountId, TokenId};
use crate::units::Amount;

/// The stakeholder role a share pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareKind {
    /// Platform fee account.
    Platform,
    /// Charity account.
    Charity,
    /// Royalty receiver (resales only).
    Royalty,
    /// Token author (first sale only; absorbs the remainder).
    Author,
    /// Current owner selling the token (resales only; absorbs the remainder).
    Seller,
    /// Excess payment returned to the buyer.
    Refund,
}

impl fmt::Display for ShareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform => write!(f, "PLATFORM"),
            Self::Charity => write!(f, "CHARITY"),
            Self::Royalty => write!(f, "ROYALTY"),
            Self::Author => write!(f, "AUTHOR"),
            Self::Seller => write!(f, "SELLER"),
            Self::Refund => write!(f, "REFUND"),
        }
    }
}

/// One stakeholder's cut of a single purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub kind: ShareKind,
    pub recipient: AccountId,
    pub amount: Amount,
}

/// The full payout split for one purchase.
///
/// Zero-amount shares are never stored: a zero royalty or an exact payment
/// simply produces no `Royalty` / `Refund` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutPlan {
    pub token_id: TokenId,
    /// The ask price this plan settles (excludes any refunded excess).
    pub sale_price: Amount,
    pub shares: Vec<Share>,
}

impl PayoutPlan {
    #[must_use]
    pub fn new(token_id: TokenId, sale_price: Amount) -> Self {
        Self {
            token_id,
            sale_price,
            shares: Vec::with_capacity(4),
        }
    }

    /// Append a share unless its amount is zero.
    pub fn push(&mut self, kind: ShareKind, recipient: AccountId, amount: Amount) {
        if amount > 0 {
            self.shares.push(Share {
                kind,
                recipient,
                amount,
            });
        }
    }

    /// Sum of every share amount.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.shares.iter().map(|s| s.amount).sum()
    }

    /// The share paying `kind`, if any.
    #[must_use]
    pub fn share(&self, kind: ShareKind) -> Option<&Share> {
        self.shares.iter().find(|s| s.kind == kind)
    }

    /// Amount paid to `kind`, zero if no such share exists.
    #[must_use]
    pub fn amount_for(&self, kind: ShareKind) -> Amount {
        self.share(kind).map_or(0, |s| s.amount)
    }

    /// Enforce the exact-sum invariant: Σ shares == payment consumed.
    ///
    /// # Errors
    /// Returns [`CurioError::PayoutImbalance`] if the totals differ.
    pub fn verify(&self, expected_total: Amount) -> Result<()> {
        let actual = self.total();
        if actual != expected_total {
            return Err(CurioError::PayoutImbalance {
                expected: expected_total,
                actual,
            });
        }
        Ok(())
    }
}
