//! # Listing Actor
//!
//! The listing store: food listings with their inventory and purchase counter.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Listing`]
//! - [`error`] - [`ListingError`] type for type-safe error handling
//! - [`actions`] - [`ListingAction`] and [`ListingActionResult`] for inventory changes
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Atomic check-and-decrement, the heart of checkout
//! let after = listing_client.sell(listing_id, 3).await?;
//!
//! // Compensation when the purchase record cannot be stored
//! listing_client.restock(listing_id, 3).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ListingClient;
use crate::framework::ResourceActor;
use crate::model::Listing;

/// Creates a new Listing actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Listing>, ListingClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ListingClient::new(generic_client))
}
