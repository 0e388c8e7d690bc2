//! # Ledger Core
//!
//! Orchestrates the four stores into atomic state transitions.
//!
//! Every operation follows the same shape: compute every new value with the
//! stores' non-mutating `checked_*` methods, in the order the preconditions
//! are defined, and only then commit. Nothing is written until every check
//! has passed, so a rejected operation leaves the ledger untouched.
//!
//! ## Precondition Order
//!
//! | Operation | Checks (first failure wins) |
//! |-----------|-----------------------------|
//! | `mint` | amount > 0, caller is minter, supply + amount <= cap, credit fits |
//! | `transfer` | amount > 0, caller balance >= amount, credit fits |
//! | `transfer_from` | amount > 0, allowance >= amount, owner balance >= amount, credit fits |
//! | `grant_minter` / `revoke_minter` / `transfer_ownership` | caller is owner |

use super::account_store::AccountStore;
use super::allowance_store::AllowanceStore;
use super::entities::{AllowanceEntry, LedgerSnapshot};
use super::errors::{ensure_positive, LedgerError, LedgerResult};
use super::role_registry::RoleRegistry;
use super::supply_tracker::SupplyTracker;
use ledger_types::{Address, Amount, LedgerEvent};
use tracing::{debug, info};

/// Balances of both sides of a movement, computed before commit.
struct PlannedMove {
    from: Address,
    from_after: Amount,
    to: Address,
    to_after: Amount,
}

/// The ledger aggregate. Exclusively owns all ledger state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerCore {
    accounts: AccountStore,
    supply: SupplyTracker,
    roles: RoleRegistry,
    allowances: AllowanceStore,
}

impl LedgerCore {
    /// Create a ledger owned by `owner`, who is also the first minter.
    ///
    /// Fails with `InvalidCap` if `cap` is zero.
    pub fn new(owner: Address, cap: Amount) -> LedgerResult<Self> {
        let supply = SupplyTracker::new(cap)?;
        info!(owner = %owner, cap = %cap, "Ledger constructed");
        Ok(Self {
            accounts: AccountStore::new(),
            supply,
            roles: RoleRegistry::new(owner),
            allowances: AllowanceStore::new(),
        })
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Balance of `id`; zero for unknown accounts.
    #[must_use]
    pub fn balance_of(&self, id: &Address) -> Amount {
        self.accounts.get_balance(id)
    }

    /// Units issued so far.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.supply.current()
    }

    /// The immutable cap.
    #[must_use]
    pub fn cap(&self) -> Amount {
        self.supply.cap()
    }

    /// True if `id` may mint.
    #[must_use]
    pub fn is_minter(&self, id: &Address) -> bool {
        self.roles.is_minter(id)
    }

    /// Current administrative owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.roles.owner()
    }

    /// Remaining allowance of `spender` over `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get_allowance(owner, spender)
    }

    /// Minters in address order.
    #[must_use]
    pub fn minters(&self) -> Vec<Address> {
        self.roles.minters().copied().collect()
    }

    /// Number of accounts holding a non-zero balance.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Read access to the balance store.
    #[must_use]
    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// Read access to the supply tracker.
    #[must_use]
    pub fn supply(&self) -> &SupplyTracker {
        &self.supply
    }

    /// Canonical copy of the full state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            owner: self.roles.owner(),
            cap: self.supply.cap(),
            total_supply: self.supply.current(),
            minters: self.minters(),
            balances: self.accounts.iter().map(|(id, b)| (*id, *b)).collect(),
            allowances: self
                .allowances
                .iter()
                .map(|(owner, spender, amount)| AllowanceEntry {
                    owner,
                    spender,
                    amount,
                })
                .collect(),
        }
    }

    // =========================================================================
    // ISSUANCE
    // =========================================================================

    /// Issue `amount` new units to `recipient`.
    pub fn mint(
        &mut self,
        caller: &Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        ensure_positive(amount)?;
        if !self.roles.is_minter(caller) {
            return Err(LedgerError::NotMinter { caller: *caller });
        }
        let supply_after = self.supply.checked_reserve(amount)?;
        let balance_after = self.accounts.checked_credit(&recipient, amount)?;

        self.supply.set_current(supply_after);
        self.accounts.set_balance(recipient, balance_after);

        debug!(recipient = %recipient, amount = %amount, total_supply = %supply_after, "Minted");
        Ok(vec![LedgerEvent::Minted { recipient, amount }])
    }

    // =========================================================================
    // BALANCE MOVEMENTS
    // =========================================================================

    /// Move `amount` from `caller` to `recipient`.
    ///
    /// A self-transfer passes the same checks and leaves the balance unchanged.
    pub fn transfer(
        &mut self,
        caller: &Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        ensure_positive(amount)?;
        let planned = self.plan_move(*caller, recipient, amount)?;
        self.commit_move(&planned);

        debug!(from = %caller, to = %recipient, amount = %amount, "Transferred");
        Ok(vec![LedgerEvent::Transferred {
            from: *caller,
            to: recipient,
            amount,
        }])
    }

    /// Move `amount` from `owner` to `recipient`, spending `caller`'s allowance.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        owner: Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        ensure_positive(amount)?;
        let allowance_after = self.allowances.checked_consume(&owner, caller, amount)?;
        let planned = self.plan_move(owner, recipient, amount)?;

        self.allowances.set_allowance(owner, *caller, allowance_after);
        self.commit_move(&planned);

        debug!(
            spender = %caller,
            from = %owner,
            to = %recipient,
            amount = %amount,
            allowance_left = %allowance_after,
            "Transferred on behalf of owner"
        );
        Ok(vec![LedgerEvent::Transferred {
            from: owner,
            to: recipient,
            amount,
        }])
    }

    fn plan_move(&self, from: Address, to: Address, amount: Amount) -> LedgerResult<PlannedMove> {
        let from_after = self.accounts.checked_debit(&from, amount)?;
        let to_after = if from == to {
            from_after.checked_add(amount).ok_or(LedgerError::Overflow)?
        } else {
            self.accounts.checked_credit(&to, amount)?
        };
        Ok(PlannedMove {
            from,
            from_after,
            to,
            to_after,
        })
    }

    fn commit_move(&mut self, planned: &PlannedMove) {
        // For a self-transfer the second write restores the original balance.
        self.accounts.set_balance(planned.from, planned.from_after);
        self.accounts.set_balance(planned.to, planned.to_after);
    }

    // =========================================================================
    // ALLOWANCES
    // =========================================================================

    /// Set the allowance of `spender` over `caller`'s balance to exactly `amount`.
    ///
    /// Never fails. Overwrites any previous allowance.
    pub fn approve(&mut self, caller: &Address, spender: Address, amount: Amount) -> LedgerEvent {
        self.allowances.set_allowance(*caller, spender, amount);

        debug!(owner = %caller, spender = %spender, amount = %amount, "Approval set");
        LedgerEvent::Approval {
            owner: *caller,
            spender,
            amount,
        }
    }

    /// Raise the allowance of `spender` over `caller`'s balance by `added`.
    pub fn increase_allowance(
        &mut self,
        caller: &Address,
        spender: Address,
        added: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let amount = self.allowances.checked_increase(caller, &spender, added)?;
        Ok(vec![self.approve(caller, spender, amount)])
    }

    /// Lower the allowance of `spender` over `caller`'s balance by `subtracted`.
    pub fn decrease_allowance(
        &mut self,
        caller: &Address,
        spender: Address,
        subtracted: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let amount = self.allowances.checked_decrease(caller, &spender, subtracted)?;
        Ok(vec![self.approve(caller, spender, amount)])
    }

    // =========================================================================
    // ROLES
    // =========================================================================

    /// Add `target` to the minter set. No event if it already was a minter.
    pub fn grant_minter(
        &mut self,
        caller: &Address,
        target: Address,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        if !self.roles.grant_minter(caller, target)? {
            return Ok(Vec::new());
        }
        info!(target = %target, "Minter granted");
        Ok(vec![LedgerEvent::MinterGranted { target }])
    }

    /// Remove `target` from the minter set. No event if it was not a minter.
    ///
    /// Supply already minted by `target` is unaffected.
    pub fn revoke_minter(
        &mut self,
        caller: &Address,
        target: Address,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        if !self.roles.revoke_minter(caller, &target)? {
            return Ok(Vec::new());
        }
        info!(target = %target, "Minter revoked");
        Ok(vec![LedgerEvent::MinterRevoked { target }])
    }

    /// Hand the owner role to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> LedgerResult<Vec<LedgerEvent>> {
        let previous_owner = self.roles.transfer_ownership(caller, new_owner)?;
        info!(previous_owner = %previous_owner, new_owner = %new_owner, "Ownership transferred");
        Ok(vec![LedgerEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        }])
    }
}
