//! # Supply Tracker
//!
//! Total issued supply against an immutable cap.

use super::errors::{ensure_positive, LedgerError, LedgerResult};
use ledger_types::Amount;

/// Issued supply and its cap. `current <= cap` at all times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupplyTracker {
    cap: Amount,
    current: Amount,
}

impl SupplyTracker {
    /// Create a tracker with zero supply. Fails with `InvalidCap` for a zero cap.
    pub fn new(cap: Amount) -> LedgerResult<Self> {
        if cap.is_zero() {
            return Err(LedgerError::InvalidCap);
        }
        Ok(Self {
            cap,
            current: Amount::zero(),
        })
    }

    /// The immutable cap.
    #[must_use]
    pub fn cap(&self) -> Amount {
        self.cap
    }

    /// Units issued so far.
    #[must_use]
    pub fn current(&self) -> Amount {
        self.current
    }

    /// Units that may still be issued.
    #[must_use]
    pub fn remaining(&self) -> Amount {
        self.cap - self.current
    }

    /// Supply after reserving `amount`. Does not mutate.
    pub fn checked_reserve(&self, amount: Amount) -> LedgerResult<Amount> {
        ensure_positive(amount)?;
        // `current <= cap`, so an overflowing sum is necessarily above the cap.
        match self.current.checked_add(amount) {
            Some(next) if next <= self.cap => Ok(next),
            _ => Err(LedgerError::CapExceeded {
                cap: self.cap,
                current: self.current,
                requested: amount,
            }),
        }
    }

    /// Increase supply by `amount`.
    pub fn reserve(&mut self, amount: Amount) -> LedgerResult<()> {
        self.current = self.checked_reserve(amount)?;
        Ok(())
    }

    /// Commit a supply computed by [`Self::checked_reserve`].
    pub(crate) fn set_current(&mut self, current: Amount) {
        debug_assert!(current <= self.cap);
        self.current = current;
    }
}
