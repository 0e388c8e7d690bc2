//! # Domain Entities
//!
//! Serializable views of ledger state handed to external collaborators.
//! Persistence of these views belongs to the hosting storage layer.

use ledger_types::{Address, Amount};
use serde::{Deserialize, Serialize};

/// One outstanding allowance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    /// Account whose balance may be spent.
    pub owner: Address,
    /// Account allowed to spend.
    pub spender: Address,
    /// Remaining allowance.
    pub amount: Amount,
}

/// Complete, canonical copy of the ledger state.
///
/// Collections are sorted by address and contain no zero entries, so two
/// ledgers with the same observable state produce equal snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Administrative owner.
    pub owner: Address,
    /// Immutable cap.
    pub cap: Amount,
    /// Issued supply.
    pub total_supply: Amount,
    /// Minter set.
    pub minters: Vec<Address>,
    /// Non-zero balances.
    pub balances: Vec<(Address, Amount)>,
    /// Non-zero allowances.
    pub allowances: Vec<AllowanceEntry>,
}

impl LedgerSnapshot {
    /// Balance of `account` as recorded in this snapshot.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances
            .iter()
            .find(|(id, _)| id == account)
            .map(|(_, balance)| *balance)
            .unwrap_or_default()
    }
}
