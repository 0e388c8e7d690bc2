//! # Driven Ports (SPI - Outbound)
//!
//! The ledger depends on a single outbound capability: delivering the events
//! of each committed operation, in emission order.
//!
//! The trait lives in `ledger-bus` so that bus implementations do not depend
//! on the ledger. [`crate::adapters::RecordingPublisher`] and
//! `ledger_bus::InMemoryEventBus` implement it.

pub use ledger_bus::EventPublisher;
