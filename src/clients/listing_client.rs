//! # Listing Client
//!
//! Provides a high‑level API for interacting with the `Listing` actor.
//! It wraps a `ResourceClient<Listing>` and exposes domain‑specific methods.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, Page, ResourceClient};
use crate::listing_actor::{ListingAction, ListingActionResult, ListingError};
use crate::model::{Listing, ListingCreate, ListingFilter, ListingId, ListingUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Listing actor.
#[derive(Clone)]
pub struct ListingClient {
    inner: ResourceClient<Listing>,
}

impl ListingClient {
    pub fn new(inner: ResourceClient<Listing>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Listing> for ListingClient {
    type Error = ListingError;

    fn inner(&self) -> &ResourceClient<Listing> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ListingError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<ListingError>() {
                Ok(err) => *err,
                Err(other) => ListingError::ActorCommunicationError(other.to_string()),
            },
            other => ListingError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(action: &str) -> ListingError {
    ListingError::ActorCommunicationError(format!("unexpected result for {action}"))
}

impl ListingClient {
    #[instrument(skip(self))]
    pub async fn insert(&self, params: ListingCreate) -> Result<ListingId, ListingError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn find_all(&self) -> Result<Vec<Listing>, ListingError> {
        self.inner
            .find(ListingFilter::All, Page::all())
            .await
            .map_err(Self::map_error)
    }

    pub async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, ListingError> {
        self.get(id).await
    }

    /// Every listing whose name is exactly `name`.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Listing>, ListingError> {
        self.inner
            .find(ListingFilter::Name(name.to_string()), Page::all())
            .await
            .map_err(Self::map_error)
    }

    pub async fn find_by_owner(&self, owner: &str) -> Result<Vec<Listing>, ListingError> {
        self.inner
            .find(ListingFilter::Owner(owner.to_string()), Page::all())
            .await
            .map_err(Self::map_error)
    }

    /// Applies an owner edit. Fails with [`ListingError::NotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub async fn update_by_id(
        &self,
        id: ListingId,
        update: ListingUpdate,
    ) -> Result<Listing, ListingError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn delete_by_id(&self, id: ListingId) -> Result<(), ListingError> {
        self.delete(id).await
    }

    /// Case-insensitive substring search on names, paged in id order.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        pattern: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Listing>, ListingError> {
        self.inner
            .find(
                ListingFilter::NameContains(pattern.to_string()),
                Page::new(skip, limit),
            )
            .await
            .map_err(Self::map_error)
    }

    /// Number of listings a [`search`](Self::search) with the same pattern would page through.
    pub async fn count_matching(&self, pattern: &str) -> Result<usize, ListingError> {
        self.inner
            .count(ListingFilter::NameContains(pattern.to_string()))
            .await
            .map_err(Self::map_error)
    }

    /// The `n` listings with the highest purchase counter, ties broken by id.
    #[instrument(skip(self))]
    pub async fn top_purchased(&self, n: usize) -> Result<Vec<Listing>, ListingError> {
        self.inner
            .find(ListingFilter::TopPurchased, Page::first(n))
            .await
            .map_err(Self::map_error)
    }

    /// Check the current stock level for a listing.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ListingId) -> Result<u32, ListingError> {
        debug!("Checking stock for listing {}", id);
        match self
            .inner
            .perform_action(id, ListingAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::CheckStock(level) => Ok(level),
            _ => Err(unexpected("CheckStock")),
        }
    }

    /// Atomically takes `quantity` units out of stock and records one purchase event.
    ///
    /// Returns the listing as it is after the sale, or
    /// [`ListingError::InsufficientInventory`] with the listing left untouched.
    #[instrument(skip(self))]
    pub async fn sell(&self, id: ListingId, quantity: u32) -> Result<Listing, ListingError> {
        debug!("Selling {} units of listing {}", quantity, id);
        match self
            .inner
            .perform_action(id, ListingAction::Sell { quantity })
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::Sell(listing) => Ok(listing),
            _ => Err(unexpected("Sell")),
        }
    }

    /// Reverses a [`sell`](Self::sell).
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ListingId, quantity: u32) -> Result<Listing, ListingError> {
        debug!("Restocking {} units of listing {}", quantity, id);
        match self
            .inner
            .perform_action(id, ListingAction::Restock { quantity })
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::Restock(listing) => Ok(listing),
            _ => Err(unexpected("Restock")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_find};
    use crate::model::ListingMetadata;

    fn listing(quantity: u32) -> Listing {
        Listing::new(
            ListingId(1),
            ListingCreate {
                name: "Pasta".into(),
                available_quantity: quantity,
                owner: "chef@example.com".into(),
                price: 12.5,
                metadata: ListingMetadata::default(),
            },
        )
    }

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);
        let listing_client = ListingClient::new(client);

        let check_task = tokio::spawn(async move { listing_client.check_stock(ListingId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ListingId(1));
        assert_eq!(action, ListingAction::CheckStock);

        responder
            .send(Ok(ListingActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_sell_sends_quantity() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);
        let listing_client = ListingClient::new(client);

        let sell_task = tokio::spawn(async move { listing_client.sell(ListingId(1), 3).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, ListingAction::Sell { quantity: 3 });

        responder
            .send(Ok(ListingActionResult::Sell(listing(2))))
            .unwrap();

        assert_eq!(sell_task.await.unwrap().unwrap().available_quantity, 2);
    }

    #[tokio::test]
    async fn test_sell_recovers_typed_error() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);
        let listing_client = ListingClient::new(client);

        let sell_task = tokio::spawn(async move { listing_client.sell(ListingId(1), 100).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ListingError::InsufficientInventory {
                    requested: 100,
                    available: 5,
                },
            ))))
            .unwrap();

        assert_eq!(
            sell_task.await.unwrap(),
            Err(ListingError::InsufficientInventory {
                requested: 100,
                available: 5
            })
        );
    }

    #[tokio::test]
    async fn test_foreign_entity_error_becomes_communication_error() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);
        let listing_client = ListingClient::new(client);

        let task = tokio::spawn(async move { listing_client.restock(ListingId(1), 1).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                std::io::Error::other("disk on fire"),
            ))))
            .unwrap();

        match task.await.unwrap() {
            Err(ListingError::ActorCommunicationError(msg)) => assert!(msg.contains("disk on fire")),
            other => panic!("Expected ActorCommunicationError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_sends_pattern_and_page() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);
        let listing_client = ListingClient::new(client);

        let task = tokio::spawn(async move { listing_client.search("pas", 6, 3).await });

        let (filter, page, responder) = expect_find(&mut receiver)
            .await
            .expect("Expected Find request");
        assert_eq!(filter, ListingFilter::NameContains("pas".into()));
        assert_eq!(page, Page::new(6, 3));
        responder.send(Ok(vec![listing(1)])).unwrap();

        assert_eq!(task.await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_typed_error() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);
        let listing_client = ListingClient::new(client);

        let task = tokio::spawn(async move {
            listing_client
                .update_by_id(ListingId(9), ListingUpdate::default())
                .await
        });

        match receiver.recv().await {
            Some(crate::framework::ResourceRequest::Update { id, respond_to, .. }) => {
                assert_eq!(id, ListingId(9));
                respond_to
                    .send(Err(FrameworkError::NotFound(id.to_string())))
                    .unwrap();
            }
            _ => panic!("Expected Update request"),
        }

        assert_eq!(
            task.await.unwrap(),
            Err(ListingError::NotFound("listing_9".into()))
        );
    }

    #[tokio::test]
    async fn test_exhausted_ids_become_communication_error() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);
        let listing_client = ListingClient::new(client);

        let task = tokio::spawn(async move {
            listing_client
                .insert(ListingCreate {
                    name: "Pasta".into(),
                    available_quantity: 1,
                    owner: "chef@example.com".into(),
                    price: 9.5,
                    metadata: ListingMetadata::default(),
                })
                .await
        });

        match receiver.recv().await {
            Some(crate::framework::ResourceRequest::Create { respond_to, .. }) => {
                respond_to.send(Err(FrameworkError::IdsExhausted)).unwrap();
            }
            _ => panic!("Expected Create request"),
        }

        match task.await.unwrap() {
            Err(ListingError::ActorCommunicationError(msg)) => assert!(msg.contains("exhausted")),
            other => panic!("Expected ActorCommunicationError, got {other:?}"),
        }
    }
}
