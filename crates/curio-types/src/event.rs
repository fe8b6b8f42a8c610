//! Observable market events.
//!
//! Events form an ordered, append-only log of everything the engine does to
//! durable state. The settlement crate owns the log itself; this module
//! defines what a log entry looks like.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AccountId, TokenId};
use crate::units::{Amount, Bps};

/// Something observable the market did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A token was minted with an opening ask price.
    Minted {
        token_id: TokenId,
        author: AccountId,
        price: Amount,
    },
    /// The ask price changed. `new_price == 0` records a delisting.
    PriceUpdated { token_id: TokenId, new_price: Amount },
    /// The author set or replaced the royalty policy.
    RoyaltyUpdated {
        token_id: TokenId,
        receiver: AccountId,
        fraction: Bps,
    },
    /// A purchase settled: ownership moved and the payment was disbursed.
    SaleCompleted {
        token_id: TokenId,
        seller: AccountId,
        buyer: AccountId,
        price: Amount,
    },
    /// A royalty share was disbursed as part of a sale.
    RoyaltyPaid {
        token_id: TokenId,
        recipient: AccountId,
        amount: Amount,
    },
    /// The emergency stop was engaged.
    Paused,
    /// The emergency stop was released.
    Unpaused,
}

impl MarketEvent {
    /// Stable uppercase tag, used in logs and the event-chain digest.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Minted { .. } => "MINTED",
            Self::PriceUpdated { .. } => "PRICE_UPDATED",
            Self::RoyaltyUpdated { .. } => "ROYALTY_UPDATED",
            Self::SaleCompleted { .. } => "SALE_COMPLETED",
            Self::RoyaltyPaid { .. } => "ROYALTY_PAID",
            Self::Paused => "PAUSED",
            Self::Unpaused => "UNPAUSED",
        }
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minted {
                token_id,
                author,
                price,
            } => write!(f, "MINTED {token_id} by {author} @ {price}"),
            Self::PriceUpdated {
                token_id,
                new_price,
            } => write!(f, "PRICE_UPDATED {token_id} -> {new_price}"),
            Self::RoyaltyUpdated {
                token_id,
                receiver,
                fraction,
            } => write!(f, "ROYALTY_UPDATED {token_id} -> {receiver} {fraction}"),
            Self::SaleCompleted {
                token_id,
                seller,
                buyer,
                price,
            } => write!(f, "SALE_COMPLETED {token_id} {seller} -> {buyer} @ {price}"),
            Self::RoyaltyPaid {
                token_id,
                recipient,
                amount,
            } => write!(f, "ROYALTY_PAID {token_id} -> {recipient} {amount}"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Unpaused => write!(f, "UNPAUSED"),
        }
    }
}

/// One entry in the append-only event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at zero.
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub event: MarketEvent,
}
