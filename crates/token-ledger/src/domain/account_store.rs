//! # Account Store
//!
//! Mapping from account identity to balance.
//!
//! Zero balances are never stored: an account at zero is indistinguishable
//! from one that was never referenced, and two stores with the same observable
//! balances compare equal.

use super::errors::{ensure_positive, LedgerError, LedgerResult};
use ledger_types::{Address, Amount};
use std::collections::BTreeMap;

/// Balances keyed by account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountStore {
    balances: BTreeMap<Address, Amount>,
}

impl AccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `id`; zero for unknown accounts.
    #[must_use]
    pub fn get_balance(&self, id: &Address) -> Amount {
        self.balances.get(id).copied().unwrap_or_default()
    }

    /// Balance `id` would have after crediting `amount`. Does not mutate.
    pub fn checked_credit(&self, id: &Address, amount: Amount) -> LedgerResult<Amount> {
        ensure_positive(amount)?;
        self.get_balance(id)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)
    }

    /// Balance `id` would have after debiting `amount`. Does not mutate.
    pub fn checked_debit(&self, id: &Address, amount: Amount) -> LedgerResult<Amount> {
        ensure_positive(amount)?;
        let available = self.get_balance(id);
        available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                required: amount,
                available,
            })
    }

    /// Increase the balance of `id` by `amount`.
    pub fn credit(&mut self, id: &Address, amount: Amount) -> LedgerResult<()> {
        let balance = self.checked_credit(id, amount)?;
        self.set_balance(*id, balance);
        Ok(())
    }

    /// Decrease the balance of `id` by `amount`. No partial debit.
    pub fn debit(&mut self, id: &Address, amount: Amount) -> LedgerResult<()> {
        let balance = self.checked_debit(id, amount)?;
        self.set_balance(*id, balance);
        Ok(())
    }

    /// Commit a balance computed by one of the `checked_*` methods.
    pub(crate) fn set_balance(&mut self, id: Address, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(&id);
        } else {
            self.balances.insert(id, balance);
        }
    }

    /// Sum of all balances, or `None` if the sum overflows.
    #[must_use]
    pub fn total(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::zero(), |acc, balance| acc.checked_add(*balance))
    }

    /// Accounts with a non-zero balance, in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Number of accounts with a non-zero balance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// True if every balance is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
