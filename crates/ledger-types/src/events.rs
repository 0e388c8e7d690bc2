//! # Ledger Events
//!
//! Every event the ledger can emit. External collaborators subscribe to these
//! through the event bus; the ledger itself never consumes them.

use crate::value_objects::{Address, Amount};
use serde::{Deserialize, Serialize};

/// Events emitted by committed ledger operations.
///
/// Failed operations emit nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    // =========================================================================
    // SUPPLY
    // =========================================================================
    /// New units were issued to `recipient`.
    Minted {
        /// Account credited.
        recipient: Address,
        /// Units issued.
        amount: Amount,
    },

    // =========================================================================
    // BALANCES
    // =========================================================================
    /// Units moved between two accounts (direct or delegated transfer).
    Transferred {
        /// Account debited.
        from: Address,
        /// Account credited.
        to: Address,
        /// Units moved.
        amount: Amount,
    },

    // =========================================================================
    // ALLOWANCES
    // =========================================================================
    /// The allowance of `spender` over `owner`'s balance is now `amount`.
    Approval {
        /// Account whose balance may be spent.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// Resulting allowance.
        amount: Amount,
    },

    // =========================================================================
    // ROLES
    // =========================================================================
    /// `target` joined the minter set.
    MinterGranted {
        /// New minter.
        target: Address,
    },

    /// `target` left the minter set.
    MinterRevoked {
        /// Former minter.
        target: Address,
    },

    /// The administrative owner changed.
    OwnershipTransferred {
        /// Owner before the call.
        previous_owner: Address,
        /// Owner after the call.
        new_owner: Address,
    },
}

/// Coarse topic used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerTopic {
    /// Issuance events.
    Supply,
    /// Balance movements.
    Transfers,
    /// Allowance changes.
    Allowances,
    /// Minter and owner changes.
    Roles,
}

impl LedgerEvent {
    /// Topic this event is published under.
    #[must_use]
    pub fn topic(&self) -> LedgerTopic {
        match self {
            Self::Minted { .. } => LedgerTopic::Supply,
            Self::Transferred { .. } => LedgerTopic::Transfers,
            Self::Approval { .. } => LedgerTopic::Allowances,
            Self::MinterGranted { .. }
            | Self::MinterRevoked { .. }
            | Self::OwnershipTransferred { .. } => LedgerTopic::Roles,
        }
    }

    /// Returns true if `account` appears in this event.
    #[must_use]
    pub fn involves(&self, account: &Address) -> bool {
        match self {
            Self::Minted { recipient, .. } => recipient == account,
            Self::Transferred { from, to, .. } => from == account || to == account,
            Self::Approval { owner, spender, .. } => owner == account || spender == account,
            Self::MinterGranted { target } | Self::MinterRevoked { target } => target == account,
            Self::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => previous_owner == account || new_owner == account,
        }
    }
}
