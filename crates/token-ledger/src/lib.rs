//! # Token Ledger - Capped Fungible Token Accounting
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Maintains balances of a single fungible token with a hard supply cap.
//! Issuance is restricted to holders of a minter role administered by a
//! single owner, and holders may delegate spending rights through allowances.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Total supply never exceeds the cap | `domain/supply_tracker.rs` - `checked_reserve()` |
//! | Sum of balances equals total supply | `domain/ledger.rs` - `mint()` / `plan_move()` |
//! | Only minters issue | `domain/ledger.rs` - `mint()` |
//! | Only the owner administers roles | `domain/role_registry.rs` - `ensure_owner()` |
//! | Rejected operations change nothing | `domain/ledger.rs` - validate-then-commit |
//! | All of the above, re-checkable | `domain/invariants.rs` - `check_all_invariants()` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | `AccountStore` | `domain/account_store.rs` | Balances |
//! | `SupplyTracker` | `domain/supply_tracker.rs` | Issued supply vs. cap |
//! | `RoleRegistry` | `domain/role_registry.rs` | Owner and minter set |
//! | `AllowanceStore` | `domain/allowance_store.rs` | Delegated spending |
//! | `LedgerCore` | `domain/ledger.rs` | Atomic operations over the stores |
//! | `TokenLedgerService` | `service.rs` | Async host, event publishing |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `EventPublisher` | Deliver committed events to the bus |
//!
//! ## Usage Example
//!
//! ```ignore
//! use token_ledger::prelude::*;
//!
//! let bus = Arc::new(InMemoryEventBus::new());
//! let service = TokenLedgerService::new(owner, cap, bus)?;
//!
//! service.mint(owner, alice, Amount::from(1000u64)).await?;
//! service.transfer(alice, bob, Amount::from(250u64)).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{AllowanceEntry, LedgerSnapshot};
    pub use crate::domain::errors::{ErrorKind, LedgerError, LedgerResult};
    pub use crate::domain::ledger::LedgerCore;

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::TokenLedgerApi;
    pub use crate::ports::outbound::EventPublisher;

    // Adapters
    pub use crate::adapters::RecordingPublisher;

    // Service
    pub use crate::config::{ConfigError, LedgerConfig, ServiceConfig};
    pub use crate::service::{ServiceStats, TokenLedgerService};

    // Shared types
    pub use ledger_bus::{EventFilter, InMemoryEventBus};
    pub use ledger_types::{Address, Amount, LedgerEvent, LedgerTopic};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
