//! The listing registry: ask price and first-sale flag per token.
//!
//! A listing exists from the moment its token is minted. An ask of zero is
//! the terminal "not for sale" state; the first-sale flag is retired exactly
//! once, by [`ListingBook::complete_sale`].

use std::collections::HashMap;

use curio_types::{Amount, CurioError, Listing, Result, TokenId};

/// Per-token listing state, keyed by token id. Sole owner of that state.
#[derive(Debug, Default)]
pub struct ListingBook {
    listings: HashMap<TokenId, Listing>,
}

impl ListingBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
        }
    }

    /// Open the listing for a freshly minted token.
    ///
    /// # Errors
    /// `InvalidPrice` on a zero opening price, `TokenExists` if the token
    /// already has a listing.
    pub fn open(&mut self, token_id: TokenId, price: Amount) -> Result<()> {
        if price == 0 {
            return Err(CurioError::InvalidPrice { offered: price });
        }
        if self.listings.contains_key(&token_id) {
            return Err(CurioError::TokenExists(token_id));
        }
        self.listings.insert(token_id, Listing::new(price));
        Ok(())
    }

    /// Overwrite the ask price.
    ///
    /// # Errors
    /// `InvalidPrice` on zero, `TokenNotFound` if the token was never
    /// minted. Caller authorization is the engine's job.
    pub fn set_price(&mut self, token_id: TokenId, new_price: Amount) -> Result<()> {
        if new_price == 0 {
            return Err(CurioError::InvalidPrice { offered: new_price });
        }
        let listing = self
            .listings
            .get_mut(&token_id)
            .ok_or(CurioError::TokenNotFound(token_id))?;
        listing.price = new_price;
        Ok(())
    }

    /// Current ask price; zero when unlisted or unknown.
    #[must_use]
    pub fn price_of(&self, token_id: TokenId) -> Amount {
        self.listings.get(&token_id).map_or(0, |l| l.price)
    }

    #[must_use]
    pub fn get(&self, token_id: TokenId) -> Option<Listing> {
        self.listings.get(&token_id).copied()
    }

    /// The listing, provided the token is actually purchasable.
    ///
    /// # Errors
    /// `NotForSale` when the ask is zero or the token is unknown.
    pub fn require_for_sale(&self, token_id: TokenId) -> Result<Listing> {
        match self.listings.get(&token_id) {
            Some(listing) if listing.is_for_sale() => Ok(*listing),
            _ => Err(CurioError::NotForSale(token_id)),
        }
    }

    /// Delist: reset the ask to zero. Unknown tokens are a no-op.
    pub fn clear(&mut self, token_id: TokenId) {
        if let Some(listing) = self.listings.get_mut(&token_id) {
            listing.clear();
        }
    }

    /// Record a completed sale: clear the ask and retire the first-sale
    /// flag. Called by the settlement engine only.
    ///
    /// # Errors
    /// `TokenNotFound` if the token has no listing.
    pub fn complete_sale(&mut self, token_id: TokenId) -> Result<()> {
        let listing = self
            .listings
            .get_mut(&token_id)
            .ok_or(CurioError::TokenNotFound(token_id))?;
        listing.complete_sale();
        Ok(())
    }

    /// Number of tokens with a listing entry (listed or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
