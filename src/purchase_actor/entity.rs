//! ActorEntity trait implementation for the Purchase domain type.
//!
//! Purchases are append-only records: they can be created, read and deleted, never edited.

use super::error::PurchaseError;
use crate::framework::ActorEntity;
use crate::model::{Purchase, PurchaseCreate, PurchaseFilter, PurchaseId};
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Purchase {
    type Id = PurchaseId;
    type Create = PurchaseCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Filter = PurchaseFilter;
    type Error = PurchaseError;

    fn from_create_params(id: PurchaseId, params: PurchaseCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(PurchaseError::Validation(
                "quantity must be a positive integer".into(),
            ));
        }
        if params.buyer.trim().is_empty() {
            return Err(PurchaseError::Validation("buyer must not be empty".into()));
        }
        Ok(Self::new(id, params))
    }

    async fn on_update(&mut self, update: Infallible) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible) -> Result<(), Self::Error> {
        match action {}
    }

    fn matches(&self, filter: &PurchaseFilter) -> bool {
        match filter {
            PurchaseFilter::All => true,
            PurchaseFilter::Buyer(buyer) => self.buyer == *buyer,
        }
    }
}
