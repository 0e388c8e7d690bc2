//! # Ports Layer (Middle Hexagon)
//!
//! Interfaces between the ledger and its collaborators.
//!
//! - **Driving Port (Inbound)**: `TokenLedgerApi`
//! - **Driven Port (Outbound)**: `EventPublisher`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
