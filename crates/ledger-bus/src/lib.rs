//! # Ledger Bus - Event Bus for Ledger Observers
//!
//! Carries [`LedgerEvent`]s from the ledger service to any number of external
//! collaborators (indexers, wallets, the runtime's event log).
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Ledger       │                    │ Observer     │
//! │ Service      │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Events are only published after the operation that produced them has
//! committed, so observers never see an event for a rejected operation.
//!
//! [`LedgerEvent`]: ledger_types::LedgerEvent

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod filter;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use filter::EventFilter;
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
