//! Pure payout planner — zero side effects, fully deterministic.
//!
//! Given a sale's parameters, produce the exact split of the payment:
//!
//! - **First sale**: platform + charity cuts by the primary schedule; the
//!   author receives the rest and absorbs all truncation remainder.
//! - **Resale**: royalty `floor(price * fraction / 10_000)` plus platform +
//!   charity cuts by the secondary schedule; the seller receives the rest
//!   and absorbs all truncation remainder.
//!
//! Under the meet-or-exceed payment policy, any excess over the ask becomes
//! an explicit refund share back to the buyer, so that the plan always sums
//! to the full payment — the exact-sum invariant, enforced before the plan
//! is returned. The engine validates the payment policy before planning; a
//! short payment slipped past that check fails verification with
//! `PayoutImbalance`.

use curio_types::{
    AccountId, Amount, CurioError, MarketConfig, MissingRoyaltyPolicy, PayoutPlan, Result,
    RoyaltyPolicy, ShareKind, TokenId,
};

/// Split a first sale: platform, charity, author (+ refund of any excess).
///
/// # Errors
/// `SharesExceedPrice` if the fixed cuts exceed the price (impossible under
/// a validated fee schedule, checked regardless).
pub fn plan_primary(
    token_id: TokenId,
    price: Amount,
    payment: Amount,
    buyer: AccountId,
    author: AccountId,
    config: &MarketConfig,
) -> Result<PayoutPlan> {
    let platform = config.primary_fees.platform_cut(price);
    let charity = config.primary_fees.charity_cut(price);
    let fixed = platform.saturating_add(charity);
    let author_amount = price
        .checked_sub(fixed)
        .ok_or(CurioError::SharesExceedPrice {
            price,
            required: fixed,
        })?;

    let mut plan = PayoutPlan::new(token_id, price);
    plan.push(ShareKind::Platform, config.platform_account, platform);
    plan.push(ShareKind::Charity, config.charity_account, charity);
    plan.push(ShareKind::Author, author, author_amount);
    plan.push(ShareKind::Refund, buyer, payment.saturating_sub(price));

    plan.verify(payment)?;
    Ok(plan)
}

/// Split a resale: royalty, platform, charity, seller (+ refund of excess).
///
/// A missing royalty policy is resolved by the configured
/// [`MissingRoyaltyPolicy`]: either the royalty share is zero and stays with
/// the seller, or the sale fails `NoRoyaltiesSet`.
///
/// # Errors
/// `NoRoyaltiesSet` under the strict missing-royalty policy,
/// `SharesExceedPrice` if fixed cuts plus royalty exceed the price.
pub fn plan_secondary(
    token_id: TokenId,
    price: Amount,
    payment: Amount,
    buyer: AccountId,
    seller: AccountId,
    policy: Option<RoyaltyPolicy>,
    config: &MarketConfig,
) -> Result<PayoutPlan> {
    let (royalty_receiver, royalty) = match policy {
        Some(policy) => (Some(policy.receiver), policy.royalty_on(price)),
        None => match config.missing_royalty {
            MissingRoyaltyPolicy::TreatAsZero => (None, 0),
            MissingRoyaltyPolicy::Reject => return Err(CurioError::NoRoyaltiesSet(token_id)),
        },
    };

    let platform = config.secondary_fees.platform_cut(price);
    let charity = config.secondary_fees.charity_cut(price);
    // Each cut is at most `price`, so their sum can exceed `u128`; a
    // saturated total can never fit in the price and fails the
    // subtraction below.
    let fixed = platform.saturating_add(charity).saturating_add(royalty);
    let seller_amount = price
        .checked_sub(fixed)
        .ok_or(CurioError::SharesExceedPrice {
            price,
            required: fixed,
        })?;

    let mut plan = PayoutPlan::new(token_id, price);
    if let Some(receiver) = royalty_receiver {
        plan.push(ShareKind::Royalty, receiver, royalty);
    }
    plan.push(ShareKind::Platform, config.platform_account, platform);
    plan.push(ShareKind::Charity, config.charity_account, charity);
    plan.push(ShareKind::Seller, seller, seller_amount);
    plan.push(ShareKind::Refund, buyer, payment.saturating_sub(price));

    plan.verify(payment)?;
    Ok(plan)
}
