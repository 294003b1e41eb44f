use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Shared plumbing of [`ListingClient`](super::ListingClient) and
/// [`PurchaseClient`](super::PurchaseClient).
///
/// Both stores answer lookups and deletions by id the same way, so the `find_by_id` and
/// `delete_by_id` methods of each client are thin calls into `get` and `delete` here.
/// Anything store specific (sell, restock, buyer queries) lives on the concrete client.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// `ListingError` or `PurchaseError`. Handlers turn it into an HTTP status.
    type Error: std::error::Error + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Recovers the store's own error from a [`FrameworkError`].
    ///
    /// `EntityError` is downcast back to `Self::Error`; `NotFound` keeps the id that was
    /// asked for. Closed channels and exhausted ids become a communication error.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Looks a document up by id. A missing id is `Ok(None)`, not an error.
    #[tracing::instrument(skip(self), fields(store = std::any::type_name::<T>()))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("lookup");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Removes a document. A missing id surfaces as the store's `NotFound`.
    #[tracing::instrument(skip(self), fields(store = std::any::type_name::<T>()))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("delete");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
