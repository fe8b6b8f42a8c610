//! Sale receipts: the immutable record of one completed settlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, SaleId, TokenId};
use crate::payout::Share;
use crate::units::Amount;

/// Immutable record of one completed purchase.
///
/// Carries everything an auditor needs to re-derive the settlement: the
/// parties, the ask price, the payment consumed, and the exact share split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// Deterministic sale identifier (token id + market-wide sale sequence).
    pub sale_id: SaleId,
    pub token_id: TokenId,
    /// Owner before the sale.
    pub seller: AccountId,
    /// Owner after the sale.
    pub buyer: AccountId,
    /// The ask price that was settled.
    pub price: Amount,
    /// The payment consumed (equals `price` plus any refunded excess).
    pub payment: Amount,
    /// Whether this settlement was the token's first sale.
    pub first_sale: bool,
    /// The disbursed shares, in payout order.
    pub shares: Vec<Share>,
    pub executed_at: DateTime<Utc>,
}

impl SaleReceipt {
    /// Sum of the disbursed share amounts. Always equals `payment`.
    #[must_use]
    pub fn disbursed(&self) -> Amount {
        self.shares.iter().map(|s| s.amount).sum()
    }
}

impl std::fmt::Display for SaleReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sale[{}] {} {} -> {} @ {} ({} shares)",
            self.sale_id,
            self.token_id,
            self.seller,
            self.buyer,
            self.price,
            self.shares.len(),
        )
    }
}
