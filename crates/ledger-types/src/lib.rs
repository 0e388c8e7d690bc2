//! # Ledger Types Crate
//!
//! Value objects and events shared across the ledger workspace.
//!
//! ## Design Principles
//!
//! - **Opaque Identity**: an [`Address`] is only compared and used as a map key.
//! - **Checked Arithmetic**: [`Amount`] is a 256-bit unsigned integer; every
//!   addition in the ledger goes through `checked_add`, never wrapping.
//! - **Single Event Surface**: [`LedgerEvent`] is the only thing the ledger
//!   emits to external collaborators.

pub mod events;
pub mod value_objects;

pub use events::{LedgerEvent, LedgerTopic};
pub use value_objects::{Address, AddressParseError, Amount, U256};
