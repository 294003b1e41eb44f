//! Error types for the Listing actor.

use thiserror::Error;

/// Errors that can occur during listing operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListingError {
    /// The requested listing was not found.
    #[error("Listing not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory { requested: u32, available: u32 },

    /// The provided quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The listing data provided is invalid.
    #[error("Listing validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
