//! Error types for the checkout flow.

use crate::listing_actor::ListingError;
use crate::model::ListingId;
use thiserror::Error;

/// Errors a purchase attempt can end with.
///
/// Everything up to and including `InsufficientInventory` is reported before any write.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// The request is malformed or ambiguous.
    #[error("Invalid purchase request: {0}")]
    Validation(String),

    /// The caller is not the buyer named in the request.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory { requested: u32, available: u32 },

    /// A store failed; no lasting change was made.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Inventory was taken but neither the purchase nor the restock could be stored.
    #[error("Partial failure on {listing} ({quantity} units): {reason}")]
    PartialFailure {
        listing: ListingId,
        quantity: u32,
        reason: String,
    },
}

impl From<ListingError> for CheckoutError {
    fn from(e: ListingError) -> Self {
        match e {
            ListingError::NotFound(id) => CheckoutError::ListingNotFound(id),
            ListingError::InsufficientInventory {
                requested,
                available,
            } => CheckoutError::InsufficientInventory {
                requested,
                available,
            },
            ListingError::InvalidQuantity(q) => {
                CheckoutError::Validation(format!("invalid quantity: {q}"))
            }
            ListingError::Validation(msg) => CheckoutError::Validation(msg),
            ListingError::ActorCommunicationError(msg) => CheckoutError::Storage(msg),
        }
    }
}
