//! # Role Registry
//!
//! The administrative owner and the set of identities allowed to mint.

use super::errors::{LedgerError, LedgerResult};
use ledger_types::Address;
use std::collections::BTreeSet;

/// Owner and minter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleRegistry {
    owner: Address,
    minters: BTreeSet<Address>,
}

impl RoleRegistry {
    /// Create a registry where `owner` is also the only minter.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            minters: BTreeSet::from([owner]),
        }
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// True if `id` is the owner.
    #[must_use]
    pub fn is_owner(&self, id: &Address) -> bool {
        self.owner == *id
    }

    /// True if `id` may mint.
    #[must_use]
    pub fn is_minter(&self, id: &Address) -> bool {
        self.minters.contains(id)
    }

    /// Minters in address order.
    pub fn minters(&self) -> impl Iterator<Item = &Address> {
        self.minters.iter()
    }

    /// Fails with `NotOwner` unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: &Address) -> LedgerResult<()> {
        if !self.is_owner(caller) {
            return Err(LedgerError::NotOwner { caller: *caller });
        }
        Ok(())
    }

    /// Add `target` to the minter set.
    ///
    /// Returns `true` if membership changed; granting an existing minter is a
    /// successful no-op.
    pub fn grant_minter(&mut self, caller: &Address, target: Address) -> LedgerResult<bool> {
        self.ensure_owner(caller)?;
        Ok(self.minters.insert(target))
    }

    /// Remove `target` from the minter set.
    ///
    /// Returns `true` if membership changed; revoking a non-minter is a
    /// successful no-op.
    pub fn revoke_minter(&mut self, caller: &Address, target: &Address) -> LedgerResult<bool> {
        self.ensure_owner(caller)?;
        Ok(self.minters.remove(target))
    }

    /// Hand the owner role to `new_owner`. Returns the previous owner.
    ///
    /// The minter set is left untouched.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> LedgerResult<Address> {
        self.ensure_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}
