//! Common test utilities and infrastructure
//!
//! This module provides shared functionality for integration tests:
//! - Cucumber world backed by the real controller and a mock ledger API

pub mod world;

#[allow(unused_imports)]
pub use world::LedgerWorld;
