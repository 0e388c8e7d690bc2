//! # Domain Errors
//!
//! Every way a ledger operation can be rejected. A rejected operation leaves
//! the ledger exactly as it was before the call.

use ledger_types::{Address, Amount};
use thiserror::Error;

/// Ledger operation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Cap must be greater than zero.
    #[error("Invalid cap: cap must be greater than zero")]
    InvalidCap,

    /// A positive amount was required.
    #[error("Invalid amount: amount must be greater than zero")]
    InvalidAmount,

    /// Caller is not the administrative owner.
    #[error("Caller is not the owner: {caller:?}")]
    NotOwner {
        /// Rejected caller.
        caller: Address,
    },

    /// Caller is not in the minter set.
    #[error("Caller is not a minter")]
    NotMinter {
        /// Rejected caller.
        caller: Address,
    },

    /// Issuance would push total supply above the cap.
    #[error("Cap exceeded: cap {cap}, current supply {current}, requested {requested}")]
    CapExceeded {
        /// Immutable cap.
        cap: Amount,
        /// Supply before the call.
        current: Amount,
        /// Units requested.
        requested: Amount,
    },

    /// Debit larger than the account balance.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Units requested.
        required: Amount,
        /// Current balance.
        available: Amount,
    },

    /// Delegated spend larger than the remaining allowance.
    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// Units requested.
        required: Amount,
        /// Remaining allowance.
        available: Amount,
    },

    /// Result not representable as a 256-bit unsigned integer.
    #[error("Arithmetic overflow")]
    Overflow,
}

/// Fieldless discriminant of [`LedgerError`], stable for collaborators
/// that only need to branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`LedgerError::InvalidCap`].
    InvalidCap,
    /// See [`LedgerError::InvalidAmount`].
    InvalidAmount,
    /// See [`LedgerError::NotOwner`].
    NotOwner,
    /// See [`LedgerError::NotMinter`].
    NotMinter,
    /// See [`LedgerError::CapExceeded`].
    CapExceeded,
    /// See [`LedgerError::InsufficientBalance`].
    InsufficientBalance,
    /// See [`LedgerError::InsufficientAllowance`].
    InsufficientAllowance,
    /// See [`LedgerError::Overflow`].
    Overflow,
}

impl LedgerError {
    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCap => ErrorKind::InvalidCap,
            Self::InvalidAmount => ErrorKind::InvalidAmount,
            Self::NotOwner { .. } => ErrorKind::NotOwner,
            Self::NotMinter { .. } => ErrorKind::NotMinter,
            Self::CapExceeded { .. } => ErrorKind::CapExceeded,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::InsufficientAllowance { .. } => ErrorKind::InsufficientAllowance,
            Self::Overflow => ErrorKind::Overflow,
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Rejects a zero amount where a positive one is required.
pub(crate) fn ensure_positive(amount: Amount) -> LedgerResult<()> {
    if amount.is_zero() {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}
