//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod listing_client;
pub mod purchase_client;

pub use actor_client::*;
pub use listing_client::*;
pub use purchase_client::*;
