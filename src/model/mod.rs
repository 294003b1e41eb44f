//! Pure data structures implementing the [`ActorEntity`](crate::framework::ActorEntity) trait.

pub mod listing;
pub mod purchase;

pub use listing::*;
pub use purchase::*;
