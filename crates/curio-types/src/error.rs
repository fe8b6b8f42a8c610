//! Error types for the Curio settlement engine.
//!
//! All errors use the `CU_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Listing errors
//! - 2xx: Payment / disbursement errors
//! - 3xx: Royalty errors
//! - 4xx: Authorization errors
//! - 5xx: Guard errors
//! - 6xx: Ownership-ledger errors
//! - 9xx: General / internal errors
//!
//! Every error is fail-fast: a precondition violation aborts the call before
//! any mutation, and a payout failure aborts after every prior mutation in
//! the same call has been rolled back. There is no retry and no partial
//! commit.

use thiserror::Error;

use crate::ids::{AccountId, TokenId};
use crate::units::{Amount, Bps};

/// Central error enum for all Curio operations.
#[derive(Debug, Error)]
pub enum CurioError {
    // =================================================================
    // Listing Errors (1xx)
    // =================================================================
    /// The token has no listing or its ask price is zero.
    #[error("CU_ERR_100: Token not for sale: {0}")]
    NotForSale(TokenId),

    /// A zero ask price was offered where a positive price is required.
    #[error("CU_ERR_101: Invalid price: {offered}")]
    InvalidPrice { offered: Amount },

    // =================================================================
    // Payment / Disbursement Errors (2xx)
    // =================================================================
    /// The payment does not meet the ask price.
    #[error("CU_ERR_200: Insufficient payment: ask {ask}, offered {offered}")]
    InsufficientPayment { ask: Amount, offered: Amount },

    /// Under the exact-price policy, the payment must equal the ask.
    #[error("CU_ERR_201: Payment mismatch: ask {ask}, offered {offered}")]
    PaymentMismatch { ask: Amount, offered: Amount },

    /// A value transfer to a payout recipient failed; the purchase aborts.
    #[error("CU_ERR_202: Transfer of {amount} to {recipient} failed: {reason}")]
    TransferFailed {
        recipient: AccountId,
        amount: Amount,
        reason: String,
    },

    /// The payer's balance cannot cover the disbursement total.
    #[error("CU_ERR_203: Insufficient funds for {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: AccountId,
        needed: Amount,
        available: Amount,
    },

    /// Fixed fees plus royalty would exceed the sale price.
    #[error("CU_ERR_204: Shares exceed price: price {price}, fixed shares {required}")]
    SharesExceedPrice { price: Amount, required: Amount },

    // =================================================================
    // Royalty Errors (3xx)
    // =================================================================
    /// The royalty fraction exceeds 10_000 bps (100%).
    #[error("CU_ERR_300: Royalty too high: {fraction}")]
    RoyaltyTooHigh { fraction: Bps },

    /// No royalty policy exists for this token.
    #[error("CU_ERR_301: No royalties set for {0}")]
    NoRoyaltiesSet(TokenId),

    /// The zero address was supplied where a payable address is required.
    #[error("CU_ERR_302: Invalid address: {context}")]
    InvalidAddress { context: &'static str },

    // =================================================================
    // Authorization Errors (4xx)
    // =================================================================
    /// The caller is not the token's current owner.
    #[error("CU_ERR_400: {caller} is not the owner of {token_id}")]
    NotOwner {
        token_id: TokenId,
        caller: AccountId,
    },

    /// The caller is not the token's author of record.
    #[error("CU_ERR_401: {caller} is not the author of {token_id}")]
    NotAuthor {
        token_id: TokenId,
        caller: AccountId,
    },

    /// The caller does not hold the administrator capability.
    #[error("CU_ERR_402: {0} is not the administrator")]
    NotAdmin(AccountId),

    /// The zero address was supplied as a token author.
    #[error("CU_ERR_403: Invalid author: the zero address cannot author tokens")]
    InvalidAuthor,

    // =================================================================
    // Guard Errors (5xx)
    // =================================================================
    /// A settlement is already in flight; re-entry is refused.
    #[error("CU_ERR_500: Reentrant call: settlement already in progress")]
    ReentrantCall,

    /// The emergency stop is engaged; mutating calls are refused.
    #[error("CU_ERR_501: Paused: emergency stop engaged")]
    Paused,

    // =================================================================
    // Ownership-Ledger Errors (6xx)
    // =================================================================
    /// The token does not exist in the ownership ledger.
    #[error("CU_ERR_600: Token not found: {0}")]
    TokenNotFound(TokenId),

    /// A token with this id already exists.
    #[error("CU_ERR_601: Token already exists: {0}")]
    TokenExists(TokenId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// The payout plan does not sum to the payment consumed — critical.
    #[error("CU_ERR_900: Payout imbalance: expected {expected}, plan totals {actual}")]
    PayoutImbalance { expected: Amount, actual: Amount },

    /// Unrecoverable internal error.
    #[error("CU_ERR_901: Internal error: {0}")]
    Internal(String),

    /// Configuration error (invalid fee schedule, zero fee accounts, etc.).
    #[error("CU_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CurioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = CurioError::NotForSale(TokenId(7));
        let msg = format!("{err}");
        assert!(msg.starts_with("CU_ERR_100"), "Got: {msg}");
        assert!(msg.contains("token:7"));
    }

    #[test]
    fn insufficient_payment_display() {
        let err = CurioError::InsufficientPayment {
            ask: 100,
            offered: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("CU_ERR_200"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn not_owner_display() {
        let err = CurioError::NotOwner {
            token_id: TokenId(1),
            caller: AccountId::test_account(3),
        };
        let msg = format!("{err}");
        assert!(msg.contains("CU_ERR_400"));
        assert!(msg.contains("token:1"));
    }

    #[test]
    fn all_errors_have_cu_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(CurioError::InvalidPrice { offered: 0 }),
            Box::new(CurioError::RoyaltyTooHigh {
                fraction: Bps(10_001),
            }),
            Box::new(CurioError::NoRoyaltiesSet(TokenId(2))),
            Box::new(CurioError::ReentrantCall),
            Box::new(CurioError::Paused),
            Box::new(CurioError::InvalidAuthor),
            Box::new(CurioError::PayoutImbalance {
                expected: 10,
                actual: 9,
            }),
            Box::new(CurioError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("CU_ERR_"),
                "Error missing CU_ERR_ prefix: {msg}"
            );
        }
    }
}
