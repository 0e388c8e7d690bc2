//! # Driving Ports (API - Inbound)
//!
//! The interface external callers use to drive the ledger. Every mutating
//! operation names its caller explicitly; there is no ambient identity.

use crate::domain::entities::LedgerSnapshot;
use crate::domain::errors::LedgerResult;
use async_trait::async_trait;
use ledger_types::{Address, Amount, LedgerEvent};

// =============================================================================
// TOKEN LEDGER API (Primary Driving Port)
// =============================================================================

/// Primary API for the capped token ledger.
///
/// Each call is applied atomically: on `Err` no state changed and no event
/// was emitted. On `Ok` the returned events have also been published.
///
/// ## Usage
///
/// ```ignore
/// let events = api.mint(owner, recipient, Amount::from(1000u64)).await?;
/// ```
#[async_trait]
pub trait TokenLedgerApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Balance of `account`; zero for unknown accounts.
    async fn balance_of(&self, account: Address) -> Amount;

    /// Units issued so far.
    async fn total_supply(&self) -> Amount;

    /// The immutable cap.
    async fn cap(&self) -> Amount;

    /// True if `account` may mint.
    async fn is_minter(&self, account: Address) -> bool;

    /// Current administrative owner.
    async fn owner(&self) -> Address;

    /// Remaining allowance of `spender` over `owner`'s balance.
    async fn allowance(&self, owner: Address, spender: Address) -> Amount;

    /// Canonical copy of the full state.
    async fn snapshot(&self) -> LedgerSnapshot;

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Issue new units. Requires the minter role and room under the cap.
    async fn mint(
        &self,
        caller: Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>>;

    /// Move units from `caller` to `recipient`.
    async fn transfer(
        &self,
        caller: Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>>;

    /// Set the allowance of `spender` over `caller`'s balance. Never fails.
    async fn approve(&self, caller: Address, spender: Address, amount: Amount) -> LedgerEvent;

    /// Move units from `owner` to `recipient` using `caller`'s allowance.
    async fn transfer_from(
        &self,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>>;

    /// Raise an allowance without overwriting it.
    async fn increase_allowance(
        &self,
        caller: Address,
        spender: Address,
        added: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>>;

    /// Lower an allowance without overwriting it.
    async fn decrease_allowance(
        &self,
        caller: Address,
        spender: Address,
        subtracted: Amount,
    ) -> LedgerResult<Vec<LedgerEvent>>;

    /// Owner only. Empty result if `target` already was a minter.
    async fn grant_minter(&self, caller: Address, target: Address)
        -> LedgerResult<Vec<LedgerEvent>>;

    /// Owner only. Empty result if `target` was not a minter.
    async fn revoke_minter(
        &self,
        caller: Address,
        target: Address,
    ) -> LedgerResult<Vec<LedgerEvent>>;

    /// Owner only. Hands the owner role to `new_owner`.
    async fn transfer_ownership(
        &self,
        caller: Address,
        new_owner: Address,
    ) -> LedgerResult<Vec<LedgerEvent>>;
}
