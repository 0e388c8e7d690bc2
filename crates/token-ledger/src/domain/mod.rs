//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger logic. No I/O, no async.
//!
//! - Four stores, each owning one slice of state.
//! - `LedgerCore` composes them into atomic operations.
//! - Dependencies point inward only; the service and adapters depend on this.

pub mod account_store;
pub mod allowance_store;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod ledger;
pub mod role_registry;
pub mod supply_tracker;

pub use account_store::AccountStore;
pub use allowance_store::AllowanceStore;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use ledger::LedgerCore;
pub use role_registry::RoleRegistry;
pub use supply_tracker::SupplyTracker;
