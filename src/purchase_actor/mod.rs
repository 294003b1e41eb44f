//! # Purchase Actor
//!
//! The purchase store. Records are immutable once written, so the entity has no
//! updates and no custom actions.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Purchase`]
//! - [`error`] - [`PurchaseError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::PurchaseClient;
use crate::framework::ResourceActor;
use crate::model::Purchase;

/// Creates a new Purchase actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Purchase>, PurchaseClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, PurchaseClient::new(generic_client))
}
