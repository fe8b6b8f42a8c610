//! # curio-settlement
//!
//! The **settlement core**: listing + royalty + payout state machine with
//! the reentrancy/pause guard around it.
//!
//! ## Architecture
//!
//! A purchase flows through four pieces:
//! 1. **[`EntryGuard`]** — pause check plus a single-flight reentrancy lock;
//!    every exit path releases the lock via an RAII permit
//! 2. **Payout planner** ([`plan_primary`] / [`plan_secondary`]) — pure and
//!    deterministic; computes the exact split of the payment, assigning all
//!    truncation remainder to the author (first sale) or seller (resale)
//! 3. **[`Market`]** — the engine: validates preconditions, requests the
//!    ownership transfer, disburses atomically through the payment bank,
//!    and mutates the registries only once nothing can fail
//! 4. **[`EventLog`]** — append-only, digest-chained record of everything
//!    observable the market did
//!
//! ## Settlement Flow
//!
//! ```text
//! caller → EntryGuard (pause + lock) → ListingBook.require_for_sale
//!        → payment-policy check → plan payout → OwnershipLedger.transfer
//!        → PaymentBank.disburse (all-or-nothing)
//!        → ListingBook.complete_sale → events → permit drop (unlock)
//! ```
//!
//! If any step fails, no state mutation from the call survives: the bank
//! unwinds its own credits and the engine compensates the ownership
//! transfer.

pub mod engine;
pub mod event_log;
pub mod guard;
pub mod planner;

pub use engine::Market;
pub use event_log::EventLog;
pub use guard::{EntryGuard, EntryPermit};
pub use planner::{plan_primary, plan_secondary};
