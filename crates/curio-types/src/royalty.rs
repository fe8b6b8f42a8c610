//! The royalty model: an optional per-token `(receiver, fraction)` policy.
//!
//! The fraction is expressed in basis points over a 10_000 denominator, the
//! convention of the non-fungible-token royalty standard. A fraction of zero
//! is valid and yields a zero royalty share without error.

use serde::{Deserialize, Serialize};

use crate::ids::AccountId;
use crate::units::{Amount, Bps};

/// Royalty policy for one token: who is owed, and what fraction of every
/// resale price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyPolicy {
    /// The account owed the royalty on every resale.
    pub receiver: AccountId,
    /// Fraction of the sale price, `0..=10_000` bps.
    pub fraction: Bps,
}

impl RoyaltyPolicy {
    #[must_use]
    pub fn new(receiver: AccountId, fraction: Bps) -> Self {
        Self { receiver, fraction }
    }

    /// Royalty owed on a sale at `price`: `floor(price * fraction / 10_000)`.
    #[must_use]
    pub fn royalty_on(&self, price: Amount) -> Amount {
        self.fraction.share_of(price)
    }
}
