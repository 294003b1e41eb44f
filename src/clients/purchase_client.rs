//! # Purchase Client
//!
//! Provides a high‑level API for interacting with the `Purchase` actor.
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, Page, ResourceClient};
use crate::model::{Purchase, PurchaseCreate, PurchaseFilter, PurchaseId};
use crate::purchase_actor::PurchaseError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Purchase actor.
#[derive(Clone)]
pub struct PurchaseClient {
    inner: ResourceClient<Purchase>,
}

impl PurchaseClient {
    pub fn new(inner: ResourceClient<Purchase>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Purchase> for PurchaseClient {
    type Error = PurchaseError;

    fn inner(&self) -> &ResourceClient<Purchase> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => PurchaseError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<PurchaseError>() {
                Ok(err) => *err,
                Err(other) => PurchaseError::ActorCommunicationError(other.to_string()),
            },
            other => PurchaseError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl PurchaseClient {
    #[instrument(skip(self))]
    pub async fn insert(&self, params: PurchaseCreate) -> Result<PurchaseId, PurchaseError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn find_all(&self) -> Result<Vec<Purchase>, PurchaseError> {
        self.inner
            .find(PurchaseFilter::All, Page::all())
            .await
            .map_err(Self::map_error)
    }

    /// Every purchase made by `buyer`, oldest first.
    #[instrument(skip(self))]
    pub async fn find_by_buyer(&self, buyer: &str) -> Result<Vec<Purchase>, PurchaseError> {
        self.inner
            .find(PurchaseFilter::Buyer(buyer.to_string()), Page::all())
            .await
            .map_err(Self::map_error)
    }

    pub async fn find_by_id(&self, id: PurchaseId) -> Result<Option<Purchase>, PurchaseError> {
        self.get(id).await
    }

    /// Removes the record. Listing counters are not touched.
    pub async fn delete_by_id(&self, id: PurchaseId) -> Result<(), PurchaseError> {
        self.delete(id).await
    }
}
