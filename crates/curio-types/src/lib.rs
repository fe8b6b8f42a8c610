//! # curio-types
//!
//! Shared types, errors, and configuration for the **Curio** marketplace
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`TokenId`], [`AccountId`], [`SaleId`]
//! - **Units**: [`Amount`], [`Bps`]
//! - **Listing model**: [`Listing`]
//! - **Royalty model**: [`RoyaltyPolicy`]
//! - **Payout model**: [`Share`], [`ShareKind`], [`PayoutPlan`]
//! - **Receipt model**: [`SaleReceipt`]
//! - **Event model**: [`MarketEvent`], [`EventRecord`]
//! - **Configuration**: [`MarketConfig`], [`FeeSchedule`], [`PaymentPolicy`], [`MissingRoyaltyPolicy`]
//! - **Errors**: [`CurioError`] with `CU_ERR_` prefix codes
//! - **Constants**: basis-point denominator, default fee schedules

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod listing;
pub mod payout;
pub mod receipt;
pub mod royalty;
pub mod units;

// Re-export all primary types at crate root for ergonomic imports:
//   use curio_types::{TokenId, Listing, PayoutPlan, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use listing::*;
pub use payout::*;
pub use receipt::*;
pub use royalty::*;
pub use units::*;

// Constants are accessed via `curio_types::constants::FOO`
// (not re-exported to avoid name collisions).
