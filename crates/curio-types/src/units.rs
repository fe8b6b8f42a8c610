//! Monetary units: indivisible base-unit amounts and basis-point fractions.
//!
//! All share arithmetic is integer arithmetic. Division truncates toward
//! zero, and the settlement planner assigns every truncation remainder to a
//! single designated party — nothing is ever silently dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::BPS_DENOMINATOR;

/// An amount of value in indivisible base units.
pub type Amount = u128;

/// A fraction expressed in basis points. `10_000` bps = 100%.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize, Default,
)]
pub struct Bps(pub u16);

impl Bps {
    /// 100% — the largest representable fraction.
    pub const MAX: Self = Self(10_000);

    /// 0% — valid, yields a zero share.
    pub const ZERO: Self = Self(0);

    /// Whether this fraction is within the legal `0..=10_000` range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0 <= Self::MAX.0
    }

    /// `floor(amount * bps / 10_000)`, computed without overflow.
    ///
    /// Splitting the amount into quotient and remainder by the denominator
    /// keeps every intermediate product within `u128` for any input.
    #[must_use]
    pub fn share_of(&self, amount: Amount) -> Amount {
        let bps = Amount::from(self.0);
        let whole = amount / BPS_DENOMINATOR;
        let rest = amount % BPS_DENOMINATOR;
        whole * bps + rest * bps / BPS_DENOMINATOR
    }
}

impl fmt::Display for Bps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_bounds() {
        assert!(Bps::ZERO.is_valid());
        assert!(Bps::MAX.is_valid());
        assert!(Bps(10_000).is_valid());
        assert!(!Bps(10_001).is_valid());
    }

    #[test]
    fn share_of_exact_percentages() {
        assert_eq!(Bps(1_000).share_of(100), 10); // 10% of 100
        assert_eq!(Bps(500).share_of(100), 5); // 5% of 100
        assert_eq!(Bps(500).share_of(200), 10);
        assert_eq!(Bps(10_000).share_of(12_345), 12_345);
        assert_eq!(Bps::ZERO.share_of(1_000_000), 0);
    }

    #[test]
    fn share_of_truncates_down() {
        // 2.5% of 99 = 2.475 → 2
        assert_eq!(Bps(250).share_of(99), 2);
        // 1 bps of 9_999 = 0.9999 → 0
        assert_eq!(Bps(1).share_of(9_999), 0);
        assert_eq!(Bps(1).share_of(10_000), 1);
    }

    #[test]
    fn share_of_huge_amount_no_overflow() {
        let amount = Amount::MAX;
        // 100% of the maximum amount must come back exactly.
        assert_eq!(Bps::MAX.share_of(amount), amount);
        // Any fraction of the maximum must not panic and stays below it.
        assert!(Bps(9_999).share_of(amount) < amount);
    }

    #[test]
    fn share_of_matches_naive_formula_on_small_inputs() {
        for amount in [0u128, 1, 7, 99, 100, 10_000, 123_456] {
            for bps in [0u16, 1, 250, 500, 5_000, 9_999, 10_000] {
                let expected = amount * u128::from(bps) / BPS_DENOMINATOR;
                assert_eq!(Bps(bps).share_of(amount), expected, "{amount} @ {bps}bps");
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Bps(500)), "500bps");
    }
}
