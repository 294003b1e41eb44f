//! Error types for the Purchase actor.

use thiserror::Error;

/// Errors that can occur during purchase operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PurchaseError {
    /// The requested purchase was not found.
    #[error("Purchase not found: {0}")]
    NotFound(String),

    /// The purchase data provided is invalid.
    #[error("Purchase validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
