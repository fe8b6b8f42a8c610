//! The payment bank: the value-transfer primitive behind settlement.
//!
//! [`PaymentBank::disburse`] is the engine's only payment operation, and it
//! is all-or-nothing: either every share of a payout plan is credited and
//! the payer debited, or the bank is left exactly as it was. This supplies
//! the transaction-boundary guarantee the settlement algorithm assumes.
//!
//! [`SettlementBank`] is the in-memory implementation. It supports
//! per-account receive hooks, invoked after each credit — the mechanism by
//! which a recipient can reject a payment (failing the whole disbursement)
//! or attempt to re-enter the engine mid-settlement.

use std::collections::HashMap;

use curio_types::{AccountId, Amount, CurioError, PayoutPlan, Result};

/// Callback run when an account receives a credit. Returning an error
/// rejects the payment and aborts the disbursement.
pub type ReceiveHook = Box<dyn FnMut(AccountId, Amount) -> Result<()>>;

/// Narrow interface to the value-transfer primitive.
pub trait PaymentBank {
    /// Debit `payer` by the plan's total and credit every share recipient.
    ///
    /// All-or-nothing: on any failure the bank's state is unchanged.
    ///
    /// # Errors
    /// - `InsufficientFunds` if the payer cannot cover the total
    /// - `TransferFailed` if any recipient rejects its credit
    fn disburse(&mut self, payer: AccountId, plan: &PayoutPlan) -> Result<()>;

    /// Current balance of an account. Zero for unknown accounts.
    fn balance_of(&self, account: AccountId) -> Amount;
}

/// In-memory payment bank.
#[derive(Default)]
pub struct SettlementBank {
    balances: HashMap<AccountId, Amount>,
    hooks: HashMap<AccountId, ReceiveHook>,
}

impl SettlementBank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            hooks: HashMap::new(),
        }
    }

    /// Credit an account from outside the settlement flow.
    pub fn deposit(&mut self, account: AccountId, amount: Amount) {
        *self.balances.entry(account).or_insert(0) += amount;
    }

    /// Install a receive hook for an account, replacing any existing one.
    pub fn install_hook(&mut self, account: AccountId, hook: ReceiveHook) {
        self.hooks.insert(account, hook);
    }

    /// Remove an account's receive hook.
    pub fn remove_hook(&mut self, account: AccountId) {
        self.hooks.remove(&account);
    }

    /// Sum of all balances. Disbursement must never change this.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.balances.values().sum()
    }

    fn credit(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let entry = self.balances.entry(account).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| CurioError::Internal(format!("balance overflow for {account}")))?;
        Ok(())
    }

    fn debit(&mut self, account: AccountId, amount: Amount) {
        // A zero debit must work even for accounts the bank has never seen.
        if amount == 0 {
            return;
        }
        let entry = self
            .balances
            .get_mut(&account)
            .expect("debit only after a balance check");
        *entry -= amount;
    }

    /// Undo credits applied so far and restore the payer's debit.
    fn unwind(&mut self, payer: AccountId, total: Amount, applied: &[(AccountId, Amount)]) {
        for &(account, amount) in applied {
            self.debit(account, amount);
        }
        self.credit(payer, total)
            .expect("restoring a just-debited balance cannot overflow");
    }
}

impl std::fmt::Debug for SettlementBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementBank")
            .field("accounts", &self.balances.len())
            .field("total_supply", &self.total_supply())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl PaymentBank for SettlementBank {
    fn disburse(&mut self, payer: AccountId, plan: &PayoutPlan) -> Result<()> {
        let total = plan.total();
        let available = self.balance_of(payer);
        if available < total {
            return Err(CurioError::InsufficientFunds {
                account: payer,
                needed: total,
                available,
            });
        }

        self.debit(payer, total);
        let mut applied: Vec<(AccountId, Amount)> = Vec::with_capacity(plan.shares.len());

        for share in &plan.shares {
            if let Err(err) = self.credit(share.recipient, share.amount) {
                self.unwind(payer, total, &applied);
                return Err(err);
            }
            applied.push((share.recipient, share.amount));

            // Receive hook runs after the credit; a rejection unwinds the
            // whole disbursement, not just this leg.
            if let Some(hook) = self.hooks.get_mut(&share.recipient) {
                if let Err(err) = hook(share.recipient, share.amount) {
                    tracing::warn!(
                        recipient = %share.recipient,
                        amount = share.amount,
                        reason = %err,
                        "Payment rejected by recipient, unwinding disbursement"
                    );
                    self.unwind(payer, total, &applied);
                    return Err(CurioError::TransferFailed {
                        recipient: share.recipient,
                        amount: share.amount,
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            payer = %payer,
            total,
            legs = plan.shares.len(),
            "Disbursement complete"
        );
        Ok(())
    }

    fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_types::{ShareKind, TokenId};

    fn acct(seed: u8) -> AccountId {
        AccountId::test_account(seed)
    }

    fn plan(shares: &[(ShareKind, AccountId, Amount)]) -> PayoutPlan {
        let mut plan = PayoutPlan::new(TokenId(1), 100);
        for &(kind, recipient, amount) in shares {
            plan.push(kind, recipient, amount);
        }
        plan
    }

    #[test]
    fn disburse_moves_funds() {
        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 100);
        let plan = plan(&[
            (ShareKind::Platform, acct(2), 10),
            (ShareKind::Author, acct(3), 90),
        ]);

        bank.disburse(acct(1), &plan).unwrap();
        assert_eq!(bank.balance_of(acct(1)), 0);
        assert_eq!(bank.balance_of(acct(2)), 10);
        assert_eq!(bank.balance_of(acct(3)), 90);
    }

    #[test]
    fn disburse_conserves_supply() {
        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 250);
        let before = bank.total_supply();
        let plan = plan(&[
            (ShareKind::Platform, acct(2), 10),
            (ShareKind::Charity, acct(3), 10),
            (ShareKind::Seller, acct(4), 180),
        ]);
        bank.disburse(acct(1), &plan).unwrap();
        assert_eq!(bank.total_supply(), before);
    }

    #[test]
    fn insufficient_funds_rejected_untouched() {
        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 50);
        let plan = plan(&[(ShareKind::Author, acct(2), 100)]);

        let err = bank.disburse(acct(1), &plan).unwrap_err();
        assert!(matches!(
            err,
            CurioError::InsufficientFunds {
                needed: 100,
                available: 50,
                ..
            }
        ));
        assert_eq!(bank.balance_of(acct(1)), 50);
        assert_eq!(bank.balance_of(acct(2)), 0);
    }

    #[test]
    fn rejecting_hook_unwinds_everything() {
        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 100);
        // Second leg rejects: the already-credited first leg must be undone.
        bank.install_hook(
            acct(3),
            Box::new(|_, _| Err(CurioError::Internal("recipient refuses value".into()))),
        );
        let plan = plan(&[
            (ShareKind::Platform, acct(2), 10),
            (ShareKind::Author, acct(3), 90),
        ]);

        let err = bank.disburse(acct(1), &plan).unwrap_err();
        assert!(matches!(err, CurioError::TransferFailed { amount: 90, .. }));
        assert_eq!(bank.balance_of(acct(1)), 100);
        assert_eq!(bank.balance_of(acct(2)), 0);
        assert_eq!(bank.balance_of(acct(3)), 0);
    }

    #[test]
    fn hook_observes_credit() {
        use std::cell::Cell;
        use std::rc::Rc;

        let seen = Rc::new(Cell::new(0u128));
        let seen_in_hook = Rc::clone(&seen);

        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 100);
        bank.install_hook(
            acct(2),
            Box::new(move |_, amount| {
                seen_in_hook.set(amount);
                Ok(())
            }),
        );
        let plan = plan(&[(ShareKind::Author, acct(2), 100)]);
        bank.disburse(acct(1), &plan).unwrap();
        assert_eq!(seen.get(), 100);
    }

    #[test]
    fn refund_leg_back_to_payer() {
        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 120);
        let plan = plan(&[
            (ShareKind::Author, acct(2), 100),
            (ShareKind::Refund, acct(1), 20),
        ]);
        bank.disburse(acct(1), &plan).unwrap();
        assert_eq!(bank.balance_of(acct(1)), 20);
        assert_eq!(bank.balance_of(acct(2)), 100);
    }

    #[test]
    fn remove_hook_restores_plain_credits() {
        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 200);
        bank.install_hook(
            acct(2),
            Box::new(|_, _| Err(CurioError::Internal("no".into()))),
        );
        bank.remove_hook(acct(2));
        let plan = plan(&[(ShareKind::Author, acct(2), 200)]);
        bank.disburse(acct(1), &plan).unwrap();
        assert_eq!(bank.balance_of(acct(2)), 200);
    }

    #[test]
    fn empty_plan_is_a_no_op() {
        let mut bank = SettlementBank::new();
        bank.deposit(acct(1), 10);
        let plan = PayoutPlan::new(TokenId(1), 0);
        bank.disburse(acct(1), &plan).unwrap();
        assert_eq!(bank.balance_of(acct(1)), 10);
    }

    #[test]
    fn empty_plan_for_unknown_payer_is_a_no_op() {
        // A payer with no balance entry covers a zero total trivially.
        let mut bank = SettlementBank::new();
        let plan = PayoutPlan::new(TokenId(1), 0);
        bank.disburse(acct(1), &plan).unwrap();
        assert_eq!(bank.balance_of(acct(1)), 0);
        assert_eq!(bank.total_supply(), 0);
    }
}
