//! # Allowance Store
//!
//! Remaining amounts a spender may move out of an owner's balance.
//!
//! `set_allowance` overwrites. A spender who sees an approval change from N
//! to M can still spend N before the change lands and M after it; callers
//! that need to avoid this use the relative adjustments.

use super::errors::{ensure_positive, LedgerError, LedgerResult};
use ledger_types::{Address, Amount};
use std::collections::BTreeMap;

/// Allowances keyed by `(owner, spender)`. Zero entries are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowanceStore {
    allowances: BTreeMap<(Address, Address), Amount>,
}

impl AllowanceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining allowance of `spender` over `owner`'s balance.
    #[must_use]
    pub fn get_allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Set the exact remaining allowance, replacing any prior value.
    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Allowance left after `spender` spends `amount`. Does not mutate.
    pub fn checked_consume(
        &self,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> LedgerResult<Amount> {
        ensure_positive(amount)?;
        let available = self.get_allowance(owner, spender);
        available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                required: amount,
                available,
            })
    }

    /// Decrease the allowance by `amount`.
    pub fn consume(&mut self, owner: &Address, spender: &Address, amount: Amount) -> LedgerResult<()> {
        let remaining = self.checked_consume(owner, spender, amount)?;
        self.set_allowance(*owner, *spender, remaining);
        Ok(())
    }

    /// Allowance after adding `added`. Does not mutate.
    pub fn checked_increase(
        &self,
        owner: &Address,
        spender: &Address,
        added: Amount,
    ) -> LedgerResult<Amount> {
        self.get_allowance(owner, spender)
            .checked_add(added)
            .ok_or(LedgerError::Overflow)
    }

    /// Allowance after removing `subtracted`. Does not mutate.
    pub fn checked_decrease(
        &self,
        owner: &Address,
        spender: &Address,
        subtracted: Amount,
    ) -> LedgerResult<Amount> {
        let available = self.get_allowance(owner, spender);
        available
            .checked_sub(subtracted)
            .ok_or(LedgerError::InsufficientAllowance {
                required: subtracted,
                available,
            })
    }

    /// Non-zero allowances as `(owner, spender, amount)`.
    pub fn iter(&self) -> impl Iterator<Item = (Address, Address, Amount)> + '_ {
        self.allowances
            .iter()
            .map(|((owner, spender), amount)| (*owner, *spender, *amount))
    }

    /// Number of non-zero allowances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allowances.len()
    }

    /// True if no allowance is outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowances.is_empty()
    }
}
