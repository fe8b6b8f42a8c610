//! System-wide constants for the Curio settlement engine.

use crate::units::Amount;

/// Basis-point denominator: 10_000 bps = 100%.
pub const BPS_DENOMINATOR: Amount = 10_000;

/// Largest legal royalty fraction (100% of the sale price).
pub const MAX_ROYALTY_BPS: u16 = 10_000;

/// Default platform fee on a first sale (10%).
pub const DEFAULT_PRIMARY_PLATFORM_BPS: u16 = 1_000;

/// Default charity share on a first sale (5%).
pub const DEFAULT_PRIMARY_CHARITY_BPS: u16 = 500;

/// Default platform fee on a resale (5%).
pub const DEFAULT_SECONDARY_PLATFORM_BPS: u16 = 500;

/// Default charity share on a resale (5%).
pub const DEFAULT_SECONDARY_CHARITY_BPS: u16 = 500;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Curio";
