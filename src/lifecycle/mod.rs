//! Runtime orchestration and lifecycle management.
//!
//! - [`MarketSystem`] - Spawns, wires, seeds and stops the store actors
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod market_system;
pub mod tracing;

pub use market_system::*;
pub use tracing::*;
