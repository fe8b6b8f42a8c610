//! Configuration for a Curio market deployment.
//!
//! Set once at deployment and passed into the settlement engine; the only
//! piece that changes afterwards is the pause flag, toggled through the
//! admin capability.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{CurioError, Result};
use crate::ids::AccountId;
use crate::units::{Amount, Bps};

/// Fixed percentage cuts taken from every sale of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Platform fee in basis points.
    pub platform_bps: Bps,
    /// Charity share in basis points.
    pub charity_bps: Bps,
}

impl FeeSchedule {
    #[must_use]
    pub fn new(platform_bps: Bps, charity_bps: Bps) -> Self {
        Self {
            platform_bps,
            charity_bps,
        }
    }

    /// Default first-sale schedule: 10% platform, 5% charity.
    #[must_use]
    pub fn primary_default() -> Self {
        Self::new(
            Bps(constants::DEFAULT_PRIMARY_PLATFORM_BPS),
            Bps(constants::DEFAULT_PRIMARY_CHARITY_BPS),
        )
    }

    /// Default resale schedule: 5% platform, 5% charity.
    #[must_use]
    pub fn secondary_default() -> Self {
        Self::new(
            Bps(constants::DEFAULT_SECONDARY_PLATFORM_BPS),
            Bps(constants::DEFAULT_SECONDARY_CHARITY_BPS),
        )
    }

    /// Platform cut of `price`, truncated down.
    #[must_use]
    pub fn platform_cut(&self, price: Amount) -> Amount {
        self.platform_bps.share_of(price)
    }

    /// Charity cut of `price`, truncated down.
    #[must_use]
    pub fn charity_cut(&self, price: Amount) -> Amount {
        self.charity_bps.share_of(price)
    }

    /// The schedule is legal when both fractions are valid and their sum
    /// does not exceed 100%.
    pub fn validate(&self) -> Result<()> {
        if !self.platform_bps.is_valid() || !self.charity_bps.is_valid() {
            return Err(CurioError::Configuration(format!(
                "fee fraction out of range: platform {}, charity {}",
                self.platform_bps, self.charity_bps
            )));
        }
        let sum = u32::from(self.platform_bps.0) + u32::from(self.charity_bps.0);
        if sum > u32::from(Bps::MAX.0) {
            return Err(CurioError::Configuration(format!(
                "fee schedule exceeds 100%: {sum} bps total"
            )));
        }
        Ok(())
    }
}

/// What the engine demands of the payment relative to the ask price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentPolicy {
    /// Payment must meet or exceed the ask; the excess is returned to the
    /// buyer as an explicit refund share.
    #[default]
    MeetOrExceed,
    /// Payment must equal the ask exactly.
    ExactPrice,
}

/// How a resale behaves when the token has no royalty policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissingRoyaltyPolicy {
    /// Royalty share is zero; the seller keeps it.
    #[default]
    TreatAsZero,
    /// The sale fails with `NoRoyaltiesSet`.
    Reject,
}

/// Deployment-time configuration of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Holder of the administrator capability (mint, pause).
    pub admin: AccountId,
    /// Recipient of the platform fee.
    pub platform_account: AccountId,
    /// Recipient of the charity share.
    pub charity_account: AccountId,
    /// Cuts applied to a token's first sale.
    pub primary_fees: FeeSchedule,
    /// Cuts applied to every resale.
    pub secondary_fees: FeeSchedule,
    pub payment_policy: PaymentPolicy,
    pub missing_royalty: MissingRoyaltyPolicy,
}

impl MarketConfig {
    /// Config with the default fee schedules and policies.
    #[must_use]
    pub fn new(admin: AccountId, platform_account: AccountId, charity_account: AccountId) -> Self {
        Self {
            admin,
            platform_account,
            charity_account,
            primary_fees: FeeSchedule::primary_default(),
            secondary_fees: FeeSchedule::secondary_default(),
            payment_policy: PaymentPolicy::default(),
            missing_royalty: MissingRoyaltyPolicy::default(),
        }
    }

    /// Reject zero addresses and illegal fee schedules.
    pub fn validate(&self) -> Result<()> {
        if self.admin.is_zero() {
            return Err(CurioError::Configuration("admin is the zero address".into()));
        }
        if self.platform_account.is_zero() {
            return Err(CurioError::InvalidAddress {
                context: "platform fee account",
            });
        }
        if self.charity_account.is_zero() {
            return Err(CurioError::InvalidAddress {
                context: "charity account",
            });
        }
        self.primary_fees.validate()?;
        self.secondary_fees.validate()?;
        Ok(())
    }
}
