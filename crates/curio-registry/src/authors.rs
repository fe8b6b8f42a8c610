//! The author-of-record map: set once at mint, immutable afterward.
//!
//! The author is the first-sale beneficiary and the only account allowed to
//! set a token's royalty policy.

use std::collections::HashMap;

use curio_types::{AccountId, CurioError, Result, TokenId};

/// Token → author map. Write-once per token.
#[derive(Debug, Default)]
pub struct AuthorRegistry {
    authors: HashMap<TokenId, AccountId>,
}

impl AuthorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            authors: HashMap::new(),
        }
    }

    /// Record a token's author at mint time.
    ///
    /// # Errors
    /// `InvalidAuthor` on the zero address, `TokenExists` if an author is
    /// already recorded (the record is immutable).
    pub fn record(&mut self, token_id: TokenId, author: AccountId) -> Result<()> {
        if author.is_zero() {
            return Err(CurioError::InvalidAuthor);
        }
        if self.authors.contains_key(&token_id) {
            return Err(CurioError::TokenExists(token_id));
        }
        self.authors.insert(token_id, author);
        Ok(())
    }

    /// The recorded author.
    ///
    /// # Errors
    /// `TokenNotFound` when no author was ever recorded.
    pub fn author_of(&self, token_id: TokenId) -> Result<AccountId> {
        self.authors
            .get(&token_id)
            .copied()
            .ok_or(CurioError::TokenNotFound(token_id))
    }

    /// Whether `caller` is the token's author.
    #[must_use]
    pub fn is_author(&self, token_id: TokenId, caller: AccountId) -> bool {
        self.authors.get(&token_id) == Some(&caller)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
