//! # Integration Tests
//!
//! Exercise the service, the bus, and the runtime together.

pub mod flows;
pub mod randomized;
