//! The listing model: the current sale offer for a token.
//!
//! An ask price of zero means "not currently for sale" — a terminal state
//! reachable from any listing via delisting or a completed purchase. The
//! `first_sale` flag transitions `true → false` exactly once, on the token's
//! first successful purchase, and never reverts.

use serde::{Deserialize, Serialize};

use crate::units::Amount;

/// The current sale offer for a token: ask price plus first-sale flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Ask price in base units. `0` means not for sale.
    pub price: Amount,
    /// Whether the token has never been sold since minting.
    pub first_sale: bool,
}

impl Listing {
    /// A fresh listing for a newly minted token.
    #[must_use]
    pub fn new(price: Amount) -> Self {
        Self {
            price,
            first_sale: true,
        }
    }

    /// Whether the token is currently purchasable.
    #[must_use]
    pub fn is_for_sale(&self) -> bool {
        self.price > 0
    }

    /// Delist: reset the ask to zero. The first-sale flag is untouched.
    pub fn clear(&mut self) {
        self.price = 0;
    }

    /// Record a completed sale: clear the ask and retire the first-sale
    /// flag. The flag never returns to `true`.
    pub fn complete_sale(&mut self) {
        self.price = 0;
        self.first_sale = false;
    }
}
