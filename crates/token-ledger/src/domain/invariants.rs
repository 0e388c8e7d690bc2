//! # Domain Invariants
//!
//! Properties that MUST hold after every committed ledger operation.
//! Checked over a [`LedgerSnapshot`] so they can run against any state a
//! collaborator holds, not only a live ledger.
//!
//! | Invariant | Statement |
//! |-----------|-----------|
//! | Supply conservation | Sum of all balances equals total supply |
//! | Cap | Cap is positive and total supply never exceeds it |
//! | Canonical entries | No zero balance or zero allowance is stored |

use super::entities::LedgerSnapshot;
use ledger_types::Amount;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Sum of balances equals total supply.
///
/// Mint is the only operation that changes the sum; transfers move value
/// without creating or destroying it.
#[must_use]
pub fn check_supply_conservation(snapshot: &LedgerSnapshot) -> bool {
    balance_sum(snapshot) == Some(snapshot.total_supply)
}

/// Cap is positive and total supply is within it.
#[must_use]
pub fn check_cap(snapshot: &LedgerSnapshot) -> bool {
    !snapshot.cap.is_zero() && snapshot.total_supply <= snapshot.cap
}

/// No zero balances or allowances are recorded.
#[must_use]
pub fn check_canonical_entries(snapshot: &LedgerSnapshot) -> bool {
    snapshot.balances.iter().all(|(_, b)| !b.is_zero())
        && snapshot.allowances.iter().all(|a| !a.amount.is_zero())
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(snapshot: &LedgerSnapshot) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_supply_conservation(snapshot) {
        violations.push(InvariantViolation::SupplyMismatch {
            balances: balance_sum(snapshot),
            total_supply: snapshot.total_supply,
        });
    }

    if !check_cap(snapshot) {
        violations.push(InvariantViolation::CapViolated {
            cap: snapshot.cap,
            total_supply: snapshot.total_supply,
        });
    }

    if !check_canonical_entries(snapshot) {
        violations.push(InvariantViolation::ZeroEntryStored);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

fn balance_sum(snapshot: &LedgerSnapshot) -> Option<Amount> {
    snapshot
        .balances
        .iter()
        .try_fold(Amount::zero(), |acc, (_, b)| acc.checked_add(*b))
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Violations found, empty when valid.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(violations) => violations,
        }
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balances do not add up to total supply. `None` if the sum overflowed.
    SupplyMismatch {
        /// Sum of recorded balances.
        balances: Option<Amount>,
        /// Recorded total supply.
        total_supply: Amount,
    },
    /// Cap is zero or supply is above it.
    CapViolated {
        /// Recorded cap.
        cap: Amount,
        /// Recorded total supply.
        total_supply: Amount,
    },
    /// A zero balance or allowance was stored.
    ZeroEntryStored,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SupplyMismatch {
                balances: Some(sum),
                total_supply,
            } => write!(f, "balances sum to {sum}, total supply is {total_supply}"),
            Self::SupplyMismatch {
                balances: None,
                total_supply,
            } => write!(f, "balances overflow, total supply is {total_supply}"),
            Self::CapViolated { cap, total_supply } => {
                write!(f, "total supply {total_supply} violates cap {cap}")
            }
            Self::ZeroEntryStored => write!(f, "zero balance or allowance stored"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
