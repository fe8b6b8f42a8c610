//! The Market settlement engine.
//!
//! Composes the listing, royalty, and author registries with the external
//! ownership ledger and payment bank, behind the entry guard. One instance
//! owns the durable state of one market deployment.
//!
//! Every mutating entry point validates all preconditions before touching
//! any state. `purchase` is the only multi-collaborator mutation: ownership
//! moves first, and if any payout leg fails the transfer is compensated
//! back, so no state from a failed call survives.

use std::rc::Rc;

use curio_ledger::{OwnershipLedger, PaymentBank};
use curio_registry::{AuthorRegistry, ListingBook, RoyaltyBook};
use curio_types::{
    AccountId, Amount, Bps, CurioError, Listing, MarketConfig, MarketEvent, PaymentPolicy, Result,
    SaleId, SaleReceipt, ShareKind, TokenId,
};

use crate::event_log::EventLog;
use crate::guard::EntryGuard;
use crate::planner::{plan_primary, plan_secondary};

/// The settlement engine for one market.
pub struct Market<L: OwnershipLedger> {
    config: MarketConfig,
    ledger: L,
    listings: ListingBook,
    royalties: RoyaltyBook,
    authors: AuthorRegistry,
    guard: Rc<EntryGuard>,
    events: EventLog,
    next_token: TokenId,
    sale_sequence: u64,
}

impl<L: OwnershipLedger> Market<L> {
    /// Create a market over an ownership ledger.
    ///
    /// # Errors
    /// `Configuration` / `InvalidAddress` if the config does not validate.
    pub fn new(config: MarketConfig, ledger: L) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            listings: ListingBook::new(),
            royalties: RoyaltyBook::new(),
            authors: AuthorRegistry::new(),
            guard: Rc::new(EntryGuard::new()),
            events: EventLog::new(),
            next_token: TokenId(1),
            sale_sequence: 0,
        })
    }

    // =====================================================================
    // Admin operations
    // =====================================================================

    /// Mint a token: the author becomes first owner, the listing opens at
    /// `initial_price`, and an optional royalty policy is installed.
    ///
    /// Admin-only; guarded against pause and reentrancy.
    ///
    /// # Errors
    /// `Paused` / `ReentrantCall` before anything else, then `NotAdmin`,
    /// `InvalidAuthor` on a zero author, `InvalidPrice` on a zero price,
    /// `InvalidAddress` / `RoyaltyTooHigh` on a bad royalty.
    pub fn mint(
        &mut self,
        caller: AccountId,
        author: AccountId,
        metadata_uri: &str,
        initial_price: Amount,
        royalty: Option<(AccountId, Bps)>,
    ) -> Result<TokenId> {
        let guard = Rc::clone(&self.guard);
        let _permit = guard.enter()?;
        self.require_admin(caller)?;

        // Validate everything before the first mutation.
        if author.is_zero() {
            return Err(CurioError::InvalidAuthor);
        }
        if initial_price == 0 {
            return Err(CurioError::InvalidPrice { offered: 0 });
        }
        if let Some((receiver, fraction)) = royalty {
            if receiver.is_zero() {
                return Err(CurioError::InvalidAddress {
                    context: "royalty receiver",
                });
            }
            if !fraction.is_valid() {
                return Err(CurioError::RoyaltyTooHigh { fraction });
            }
        }

        let token_id = self.next_token;
        self.ledger.mint(author, token_id, metadata_uri)?;
        self.authors.record(token_id, author)?;
        self.listings.open(token_id, initial_price)?;
        if let Some((receiver, fraction)) = royalty {
            self.royalties.set_policy(token_id, receiver, fraction)?;
        }
        self.next_token = token_id.next();

        self.events.emit(MarketEvent::Minted {
            token_id,
            author,
            price: initial_price,
        });
        if let Some((receiver, fraction)) = royalty {
            self.events.emit(MarketEvent::RoyaltyUpdated {
                token_id,
                receiver,
                fraction,
            });
        }
        tracing::info!(
            token = %token_id,
            author = %author,
            price = initial_price,
            "Token minted"
        );
        Ok(token_id)
    }

    /// Engage the emergency stop. Admin-only.
    pub fn pause(&mut self, caller: AccountId) -> Result<()> {
        self.require_admin(caller)?;
        self.guard.pause();
        self.events.emit(MarketEvent::Paused);
        tracing::warn!("Emergency stop engaged");
        Ok(())
    }

    /// Release the emergency stop. Admin-only.
    pub fn unpause(&mut self, caller: AccountId) -> Result<()> {
        self.require_admin(caller)?;
        self.guard.unpause();
        self.events.emit(MarketEvent::Unpaused);
        tracing::info!("Emergency stop released");
        Ok(())
    }

    // =====================================================================
    // Owner / author operations
    // =====================================================================

    /// Overwrite the ask price. Owner-only.
    ///
    /// # Errors
    /// `Paused`, `NotOwner`, `InvalidPrice` on zero, `TokenNotFound`.
    pub fn set_price(
        &mut self,
        caller: AccountId,
        token_id: TokenId,
        new_price: Amount,
    ) -> Result<()> {
        self.guard.check_not_paused()?;
        self.require_owner(token_id, caller)?;
        self.listings.set_price(token_id, new_price)?;
        self.events.emit(MarketEvent::PriceUpdated {
            token_id,
            new_price,
        });
        tracing::debug!(token = %token_id, new_price, "Ask price updated");
        Ok(())
    }

    /// Take the token off the market. Owner-only.
    ///
    /// # Errors
    /// `Paused`, `NotOwner`, `TokenNotFound`.
    pub fn delist(&mut self, caller: AccountId, token_id: TokenId) -> Result<()> {
        self.guard.check_not_paused()?;
        self.require_owner(token_id, caller)?;
        self.listings.clear(token_id);
        self.events.emit(MarketEvent::PriceUpdated {
            token_id,
            new_price: 0,
        });
        tracing::debug!(token = %token_id, "Token delisted");
        Ok(())
    }

    /// Set or replace the royalty policy. Author-only; last write wins.
    ///
    /// # Errors
    /// `Paused`, `TokenNotFound`, `NotAuthor`, `InvalidAddress`,
    /// `RoyaltyTooHigh`.
    pub fn set_royalty(
        &mut self,
        caller: AccountId,
        token_id: TokenId,
        receiver: AccountId,
        fraction: Bps,
    ) -> Result<()> {
        self.guard.check_not_paused()?;
        let author = self.authors.author_of(token_id)?;
        if author != caller {
            return Err(CurioError::NotAuthor { token_id, caller });
        }
        self.royalties.set_policy(token_id, receiver, fraction)?;
        self.events.emit(MarketEvent::RoyaltyUpdated {
            token_id,
            receiver,
            fraction,
        });
        tracing::debug!(
            token = %token_id,
            receiver = %receiver,
            fraction = %fraction,
            "Royalty policy updated"
        );
        Ok(())
    }

    // =====================================================================
    // Settlement
    // =====================================================================

    /// Purchase a listed token.
    ///
    /// Validates the listing and payment, plans the payout split (first
    /// sale vs. resale), moves ownership, disburses atomically, then clears
    /// the listing and retires the first-sale flag. On any failure no state
    /// from this call survives.
    ///
    /// # Errors
    /// `Paused`, `ReentrantCall`, `NotForSale`, `InsufficientPayment` /
    /// `PaymentMismatch`, `NoRoyaltiesSet` (strict missing-royalty policy),
    /// `InsufficientFunds`, `TransferFailed`.
    pub fn purchase(
        &mut self,
        bank: &mut dyn PaymentBank,
        token_id: TokenId,
        buyer: AccountId,
        payment: Amount,
    ) -> Result<SaleReceipt> {
        let guard = Rc::clone(&self.guard);
        let _permit = guard.enter()?;

        if buyer.is_zero() {
            return Err(CurioError::InvalidAddress { context: "buyer" });
        }
        let listing = self.listings.require_for_sale(token_id)?;
        let price = listing.price;
        match self.config.payment_policy {
            PaymentPolicy::ExactPrice => {
                if payment != price {
                    return Err(CurioError::PaymentMismatch {
                        ask: price,
                        offered: payment,
                    });
                }
            }
            PaymentPolicy::MeetOrExceed => {
                if payment < price {
                    return Err(CurioError::InsufficientPayment {
                        ask: price,
                        offered: payment,
                    });
                }
            }
        }

        let seller = self.ledger.owner_of(token_id)?;
        let plan = if listing.first_sale {
            let author = self.authors.author_of(token_id)?;
            plan_primary(token_id, price, payment, buyer, author, &self.config)?
        } else {
            let policy = self.royalties.policy_of(token_id);
            plan_secondary(token_id, price, payment, buyer, seller, policy, &self.config)?
        };

        // Ownership moves before the money. The bank's disbursement is
        // all-or-nothing; if it fails, the transfer is compensated back and
        // the call leaves no trace.
        self.ledger.transfer(seller, buyer, token_id)?;
        if let Err(err) = bank.disburse(buyer, &plan) {
            self.ledger.transfer(buyer, seller, token_id).map_err(|undo| {
                CurioError::Internal(format!("compensation after payout abort failed: {undo}"))
            })?;
            return Err(err);
        }

        self.listings.complete_sale(token_id)?;
        let sale_id = SaleId::deterministic(token_id, self.sale_sequence);
        self.sale_sequence += 1;

        self.events.emit(MarketEvent::SaleCompleted {
            token_id,
            seller,
            buyer,
            price,
        });
        if let Some(royalty) = plan.share(ShareKind::Royalty) {
            self.events.emit(MarketEvent::RoyaltyPaid {
                token_id,
                recipient: royalty.recipient,
                amount: royalty.amount,
            });
        }
        tracing::info!(
            sale = %sale_id,
            token = %token_id,
            seller = %seller,
            buyer = %buyer,
            price,
            payment,
            first_sale = listing.first_sale,
            "Sale completed"
        );

        Ok(SaleReceipt {
            sale_id,
            token_id,
            seller,
            buyer,
            price,
            payment,
            first_sale: listing.first_sale,
            shares: plan.shares,
            executed_at: chrono::Utc::now(),
        })
    }

    // =====================================================================
    // Read-only views
    // =====================================================================

    /// The listing, if the token was ever minted.
    #[must_use]
    pub fn listing_of(&self, token_id: TokenId) -> Option<Listing> {
        self.listings.get(token_id)
    }

    /// Current ask price; zero when unlisted.
    #[must_use]
    pub fn price_of(&self, token_id: TokenId) -> Amount {
        self.listings.price_of(token_id)
    }

    /// Royalty receiver and amount for a hypothetical sale at `sale_price`.
    ///
    /// # Errors
    /// `NoRoyaltiesSet` when the token has no policy.
    pub fn royalty_info(&self, token_id: TokenId, sale_price: Amount) -> Result<(AccountId, Amount)> {
        self.royalties.royalty_info(token_id, sale_price)
    }

    /// The author of record.
    ///
    /// # Errors
    /// `TokenNotFound` for an unminted token.
    pub fn author_of(&self, token_id: TokenId) -> Result<AccountId> {
        self.authors.author_of(token_id)
    }

    /// Current owner, via the ownership ledger.
    ///
    /// # Errors
    /// `TokenNotFound` for an unminted token.
    pub fn owner_of(&self, token_id: TokenId) -> Result<AccountId> {
        self.ledger.owner_of(token_id)
    }

    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// The observable event log.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Shared handle to the entry guard. Payment-recipient hooks hold this
    /// to observe the same single-flight lock an in-flight settlement does.
    #[must_use]
    pub fn entry_guard(&self) -> Rc<EntryGuard> {
        Rc::clone(&self.guard)
    }

    fn require_admin(&self, caller: AccountId) -> Result<()> {
        if caller != self.config.admin {
            return Err(CurioError::NotAdmin(caller));
        }
        Ok(())
    }

    fn require_owner(&self, token_id: TokenId, caller: AccountId) -> Result<()> {
        let owner = self.ledger.owner_of(token_id)?;
        if owner != caller {
            return Err(CurioError::NotOwner { token_id, caller });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_ledger::{PaymentBank as _, SettlementBank, TokenRegistry};

    fn acct(seed: u8) -> AccountId {
        AccountId::test_account(seed)
    }

    const ADMIN: u8 = 10;
    const PLATFORM: u8 = 11;
    const CHARITY: u8 = 12;

    fn market() -> Market<TokenRegistry> {
        let config = MarketConfig::new(acct(ADMIN), acct(PLATFORM), acct(CHARITY));
        Market::new(config, TokenRegistry::new()).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = MarketConfig::new(acct(ADMIN), acct(PLATFORM), acct(CHARITY));
        config.platform_account = AccountId::ZERO;
        assert!(Market::new(config, TokenRegistry::new()).is_err());
    }

    #[test]
    fn mint_allocates_sequential_ids() {
        let mut market = market();
        let t1 = market
            .mint(acct(ADMIN), acct(1), "ipfs://a", 100, None)
            .unwrap();
        let t2 = market
            .mint(acct(ADMIN), acct(1), "ipfs://b", 100, None)
            .unwrap();
        assert_eq!(t1, TokenId(1));
        assert_eq!(t2, TokenId(2));
        assert_eq!(market.owner_of(t1).unwrap(), acct(1));
        assert_eq!(market.author_of(t1).unwrap(), acct(1));
        assert_eq!(market.price_of(t1), 100);
        assert!(market.listing_of(t1).unwrap().first_sale);
    }

    #[test]
    fn mint_requires_admin() {
        let mut market = market();
        let err = market
            .mint(acct(1), acct(1), "u", 100, None)
            .unwrap_err();
        assert!(matches!(err, CurioError::NotAdmin(_)));
    }

    #[test]
    fn mint_validates_inputs() {
        let mut market = market();
        assert!(matches!(
            market
                .mint(acct(ADMIN), AccountId::ZERO, "u", 100, None)
                .unwrap_err(),
            CurioError::InvalidAuthor
        ));
        assert!(matches!(
            market.mint(acct(ADMIN), acct(1), "u", 0, None).unwrap_err(),
            CurioError::InvalidPrice { offered: 0 }
        ));
        assert!(matches!(
            market
                .mint(acct(ADMIN), acct(1), "u", 100, Some((AccountId::ZERO, Bps(500))))
                .unwrap_err(),
            CurioError::InvalidAddress { .. }
        ));
        assert!(matches!(
            market
                .mint(acct(ADMIN), acct(1), "u", 100, Some((acct(1), Bps(10_001))))
                .unwrap_err(),
            CurioError::RoyaltyTooHigh { .. }
        ));
        // Nothing was minted by the failed attempts.
        assert!(market.listing_of(TokenId(1)).is_none());
    }

    #[test]
    fn mint_with_royalty_installs_policy() {
        let mut market = market();
        let token = market
            .mint(acct(ADMIN), acct(1), "u", 100, Some((acct(1), Bps(500))))
            .unwrap();
        let (receiver, amount) = market.royalty_info(token, 200).unwrap();
        assert_eq!(receiver, acct(1));
        assert_eq!(amount, 10);
    }

    #[test]
    fn set_price_owner_only() {
        let mut market = market();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();

        let err = market.set_price(acct(2), token, 200).unwrap_err();
        assert!(matches!(err, CurioError::NotOwner { .. }));
        assert_eq!(market.price_of(token), 100);

        market.set_price(acct(1), token, 200).unwrap();
        assert_eq!(market.price_of(token), 200);
    }

    #[test]
    fn delist_clears_ask() {
        let mut market = market();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();
        market.delist(acct(1), token).unwrap();
        assert_eq!(market.price_of(token), 0);
        assert!(market.listing_of(token).unwrap().first_sale);
    }

    #[test]
    fn set_royalty_author_only() {
        let mut market = market();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();

        let err = market
            .set_royalty(acct(2), token, acct(2), Bps(500))
            .unwrap_err();
        assert!(matches!(err, CurioError::NotAuthor { .. }));
        assert!(market.royalty_info(token, 100).is_err());

        market.set_royalty(acct(1), token, acct(1), Bps(500)).unwrap();
        assert_eq!(market.royalty_info(token, 100).unwrap(), (acct(1), 5));
    }

    #[test]
    fn royalty_info_without_policy_is_strict() {
        let mut market = market();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();
        assert!(matches!(
            market.royalty_info(token, 100).unwrap_err(),
            CurioError::NoRoyaltiesSet(_)
        ));
    }

    #[test]
    fn purchase_first_sale_happy_path() {
        let mut market = market();
        let mut bank = SettlementBank::new();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();
        bank.deposit(acct(2), 100);

        let receipt = market.purchase(&mut bank, token, acct(2), 100).unwrap();
        assert!(receipt.first_sale);
        assert_eq!(receipt.price, 100);
        assert_eq!(receipt.disbursed(), 100);
        assert_eq!(market.owner_of(token).unwrap(), acct(2));
        assert_eq!(market.price_of(token), 0);
        assert!(!market.listing_of(token).unwrap().first_sale);
    }

    #[test]
    fn purchase_unlisted_fails_not_for_sale() {
        let mut market = market();
        let mut bank = SettlementBank::new();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();
        market.delist(acct(1), token).unwrap();
        bank.deposit(acct(2), 100);

        let err = market.purchase(&mut bank, token, acct(2), 100).unwrap_err();
        assert!(matches!(err, CurioError::NotForSale(_)));
        assert_eq!(market.owner_of(token).unwrap(), acct(1));
        assert_eq!(bank.balance_of(acct(2)), 100);
    }

    #[test]
    fn purchase_zero_buyer_rejected() {
        let mut market = market();
        let mut bank = SettlementBank::new();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();
        let err = market
            .purchase(&mut bank, token, AccountId::ZERO, 100)
            .unwrap_err();
        assert!(matches!(err, CurioError::InvalidAddress { .. }));
    }

    #[test]
    fn exact_price_policy_rejects_overpayment() {
        let mut config = MarketConfig::new(acct(ADMIN), acct(PLATFORM), acct(CHARITY));
        config.payment_policy = PaymentPolicy::ExactPrice;
        let mut market = Market::new(config, TokenRegistry::new()).unwrap();
        let mut bank = SettlementBank::new();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();
        bank.deposit(acct(2), 150);

        let err = market.purchase(&mut bank, token, acct(2), 150).unwrap_err();
        assert!(matches!(
            err,
            CurioError::PaymentMismatch {
                ask: 100,
                offered: 150
            }
        ));

        market.purchase(&mut bank, token, acct(2), 100).unwrap();
    }

    #[test]
    fn pause_blocks_mutating_calls() {
        let mut market = market();
        let mut bank = SettlementBank::new();
        let token = market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap();
        bank.deposit(acct(2), 100);

        assert!(matches!(
            market.pause(acct(1)).unwrap_err(),
            CurioError::NotAdmin(_)
        ));
        market.pause(acct(ADMIN)).unwrap();

        assert!(matches!(
            market.purchase(&mut bank, token, acct(2), 100).unwrap_err(),
            CurioError::Paused
        ));
        assert!(matches!(
            market.mint(acct(ADMIN), acct(1), "u", 100, None).unwrap_err(),
            CurioError::Paused
        ));
        assert!(matches!(
            market.set_price(acct(1), token, 200).unwrap_err(),
            CurioError::Paused
        ));
        assert!(matches!(
            market
                .set_royalty(acct(1), token, acct(1), Bps(100))
                .unwrap_err(),
            CurioError::Paused
        ));

        market.unpause(acct(ADMIN)).unwrap();
        market.purchase(&mut bank, token, acct(2), 100).unwrap();
    }

    #[test]
    fn paused_market_reports_paused_before_authorization() {
        let mut market = market();
        market.pause(acct(ADMIN)).unwrap();
        // Even a non-admin caller sees the pause state, not NotAdmin.
        assert!(matches!(
            market.mint(acct(1), acct(1), "u", 100, None).unwrap_err(),
            CurioError::Paused
        ));
    }

    #[test]
    fn events_record_lifecycle() {
        let mut market = market();
        let mut bank = SettlementBank::new();
        let token = market
            .mint(acct(ADMIN), acct(1), "u", 100, Some((acct(1), Bps(500))))
            .unwrap();
        market.set_price(acct(1), token, 120).unwrap();
        bank.deposit(acct(2), 120);
        market.purchase(&mut bank, token, acct(2), 120).unwrap();

        let tags: Vec<&str> = market
            .events()
            .records()
            .iter()
            .map(|r| r.event.tag())
            .collect();
        assert_eq!(
            tags,
            vec![
                "MINTED",
                "ROYALTY_UPDATED",
                "PRICE_UPDATED",
                "SALE_COMPLETED"
            ]
        );
    }

    #[test]
    fn resale_emits_royalty_paid() {
        let mut market = market();
        let mut bank = SettlementBank::new();
        let token = market
            .mint(acct(ADMIN), acct(1), "u", 100, Some((acct(1), Bps(500))))
            .unwrap();
        bank.deposit(acct(2), 100);
        market.purchase(&mut bank, token, acct(2), 100).unwrap();

        market.set_price(acct(2), token, 200).unwrap();
        bank.deposit(acct(3), 200);
        market.purchase(&mut bank, token, acct(3), 200).unwrap();

        let royalty_events = market.events().with_tag("ROYALTY_PAID");
        assert_eq!(royalty_events.len(), 1);
        assert!(matches!(
            royalty_events[0].event,
            MarketEvent::RoyaltyPaid { amount: 10, .. }
        ));
    }
}
