//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.
//!
//! - `RecordingPublisher`: keeps every published event in memory, in order.
//! - The broadcast bus from `ledger-bus` is the production publisher.

pub mod recording;

pub use recording::RecordingPublisher;
