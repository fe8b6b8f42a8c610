//! # curio-ledger
//!
//! The settlement engine's **external collaborators**, modeled behind narrow
//! traits with in-memory implementations:
//!
//! 1. **[`OwnershipLedger`]** — the non-fungible token ledger: mint,
//!    `owner_of`, transfer, metadata. Assumed atomic and correct; the
//!    engine only reads owners and requests transfers.
//! 2. **[`PaymentBank`]** — the value-transfer primitive. Its single
//!    settlement operation, [`PaymentBank::disburse`], is all-or-nothing:
//!    either every share of a payout plan is credited, or none are.
//!
//! ## Order Flow
//!
//! ```text
//! Market::purchase → OwnershipLedger::owner_of → plan payout
//!                  → OwnershipLedger::transfer → PaymentBank::disburse
//! ```
//!
//! The in-memory [`SettlementBank`] additionally supports per-account
//! **receive hooks** — callbacks run when an account is credited — which is
//! how tests model a recipient that rejects a payment or attempts to
//! re-enter the engine mid-disbursement.

pub mod ownership;
pub mod payments;

pub use ownership::{OwnershipLedger, TokenRegistry};
pub use payments::{PaymentBank, ReceiveHook, SettlementBank};
