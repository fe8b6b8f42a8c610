//! The ownership ledger: who currently owns each token.
//!
//! The settlement engine treats this as an already-correct external system —
//! a standard non-fungible-token ledger. [`TokenRegistry`] is the in-memory
//! implementation used in tests and single-process deployments.

use std::collections::HashMap;

use curio_types::{AccountId, CurioError, Result, TokenId};

/// Narrow interface to the non-fungible-token ledger.
pub trait OwnershipLedger {
    /// Create a token owned by `owner`.
    ///
    /// # Errors
    /// `TokenExists` if the id is already taken, `InvalidAddress` if the
    /// owner is the zero address.
    fn mint(&mut self, owner: AccountId, token_id: TokenId, metadata_uri: &str) -> Result<()>;

    /// Current owner of a token.
    ///
    /// # Errors
    /// `TokenNotFound` if the token does not exist.
    fn owner_of(&self, token_id: TokenId) -> Result<AccountId>;

    /// Move a token from `from` to `to`.
    ///
    /// # Errors
    /// `TokenNotFound` if the token does not exist, `NotOwner` if `from` is
    /// not the current owner, `InvalidAddress` if `to` is the zero address.
    fn transfer(&mut self, from: AccountId, to: AccountId, token_id: TokenId) -> Result<()>;

    /// Metadata reference stored at mint time.
    ///
    /// # Errors
    /// `TokenNotFound` if the token does not exist.
    fn metadata_uri(&self, token_id: TokenId) -> Result<String>;
}

#[derive(Debug, Clone)]
struct TokenRecord {
    owner: AccountId,
    metadata_uri: String,
}

/// In-memory ownership ledger.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<TokenId, TokenRecord>,
}

impl TokenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// Number of minted tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl OwnershipLedger for TokenRegistry {
    fn mint(&mut self, owner: AccountId, token_id: TokenId, metadata_uri: &str) -> Result<()> {
        if owner.is_zero() {
            return Err(CurioError::InvalidAddress {
                context: "token owner",
            });
        }
        if self.tokens.contains_key(&token_id) {
            return Err(CurioError::TokenExists(token_id));
        }
        self.tokens.insert(
            token_id,
            TokenRecord {
                owner,
                metadata_uri: metadata_uri.to_string(),
            },
        );
        Ok(())
    }

    fn owner_of(&self, token_id: TokenId) -> Result<AccountId> {
        self.tokens
            .get(&token_id)
            .map(|record| record.owner)
            .ok_or(CurioError::TokenNotFound(token_id))
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, token_id: TokenId) -> Result<()> {
        if to.is_zero() {
            return Err(CurioError::InvalidAddress {
                context: "transfer recipient",
            });
        }
        let record = self
            .tokens
            .get_mut(&token_id)
            .ok_or(CurioError::TokenNotFound(token_id))?;
        if record.owner != from {
            return Err(CurioError::NotOwner {
                token_id,
                caller: from,
            });
        }
        record.owner = to;
        Ok(())
    }

    fn metadata_uri(&self, token_id: TokenId) -> Result<String> {
        self.tokens
            .get(&token_id)
            .map(|record| record.metadata_uri.clone())
            .ok_or(CurioError::TokenNotFound(token_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(seed: u8) -> AccountId {
        AccountId::test_account(seed)
    }

    #[test]
    fn mint_and_read_back() {
        let mut ledger = TokenRegistry::new();
        ledger.mint(acct(1), TokenId(1), "ipfs://a").unwrap();
        assert_eq!(ledger.owner_of(TokenId(1)).unwrap(), acct(1));
        assert_eq!(ledger.metadata_uri(TokenId(1)).unwrap(), "ipfs://a");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn duplicate_mint_rejected() {
        let mut ledger = TokenRegistry::new();
        ledger.mint(acct(1), TokenId(1), "u").unwrap();
        let err = ledger.mint(acct(2), TokenId(1), "u").unwrap_err();
        assert!(matches!(err, CurioError::TokenExists(TokenId(1))));
    }

    #[test]
    fn zero_owner_rejected() {
        let mut ledger = TokenRegistry::new();
        let err = ledger.mint(AccountId::ZERO, TokenId(1), "u").unwrap_err();
        assert!(matches!(err, CurioError::InvalidAddress { .. }));
    }

    #[test]
    fn transfer_moves_ownership() {
        let mut ledger = TokenRegistry::new();
        ledger.mint(acct(1), TokenId(1), "u").unwrap();
        ledger.transfer(acct(1), acct(2), TokenId(1)).unwrap();
        assert_eq!(ledger.owner_of(TokenId(1)).unwrap(), acct(2));
    }

    #[test]
    fn transfer_from_non_owner_rejected() {
        let mut ledger = TokenRegistry::new();
        ledger.mint(acct(1), TokenId(1), "u").unwrap();
        let err = ledger.transfer(acct(2), acct(3), TokenId(1)).unwrap_err();
        assert!(matches!(err, CurioError::NotOwner { .. }));
        // Ownership unchanged.
        assert_eq!(ledger.owner_of(TokenId(1)).unwrap(), acct(1));
    }

    #[test]
    fn transfer_to_zero_rejected() {
        let mut ledger = TokenRegistry::new();
        ledger.mint(acct(1), TokenId(1), "u").unwrap();
        let err = ledger
            .transfer(acct(1), AccountId::ZERO, TokenId(1))
            .unwrap_err();
        assert!(matches!(err, CurioError::InvalidAddress { .. }));
    }

    #[test]
    fn unknown_token_errors() {
        let ledger = TokenRegistry::new();
        assert!(matches!(
            ledger.owner_of(TokenId(9)).unwrap_err(),
            CurioError::TokenNotFound(TokenId(9))
        ));
        assert!(matches!(
            ledger.metadata_uri(TokenId(9)).unwrap_err(),
            CurioError::TokenNotFound(TokenId(9))
        ));
    }
}
