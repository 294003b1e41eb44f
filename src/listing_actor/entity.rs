//! ActorEntity trait implementation for the Listing domain type.
//!
//! This module contains the [`ActorEntity`] implementation that enables [`Listing`] to be
//! managed by the generic [`ResourceActor`](crate::framework::ResourceActor), including
//! the inventory actions that keep `available_quantity` and `purchase_count` consistent.

use super::actions::{ListingAction, ListingActionResult};
use super::error::ListingError;
use crate::framework::ActorEntity;
use crate::model::{Listing, ListingCreate, ListingFilter, ListingId, ListingUpdate};
use async_trait::async_trait;
use std::cmp::Ordering;

fn validate_name(name: &str) -> Result<(), ListingError> {
    if name.trim().is_empty() {
        return Err(ListingError::Validation("name must not be empty".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ListingError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ListingError::Validation(format!("invalid price: {price}")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Listing {
    type Id = ListingId;
    type Create = ListingCreate;
    type Update = ListingUpdate;
    type Action = ListingAction;
    type ActionResult = ListingActionResult;
    type Filter = ListingFilter;
    type Error = ListingError;

    /// Creates a new Listing from creation parameters.
    fn from_create_params(id: ListingId, params: ListingCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        if params.owner.trim().is_empty() {
            return Err(ListingError::Validation("owner must not be empty".into()));
        }
        Ok(Self::new(id, params))
    }

    /// Applies owner edits. The purchase counter is never touched here.
    async fn on_update(&mut self, update: ListingUpdate) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name;
        }
        if let Some(quantity) = update.available_quantity {
            self.available_quantity = quantity;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
        Ok(())
    }

    /// Handles inventory actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `Sell`: Decrements stock and bumps the purchase counter, or fails untouched
    /// - `Restock`: Reverses one `Sell`
    async fn handle_action(
        &mut self,
        action: ListingAction,
    ) -> Result<ListingActionResult, Self::Error> {
        match action {
            ListingAction::CheckStock => Ok(ListingActionResult::CheckStock(self.available_quantity)),
            ListingAction::Sell { quantity } => {
                if quantity == 0 {
                    return Err(ListingError::InvalidQuantity(quantity));
                }
                if quantity > self.available_quantity {
                    return Err(ListingError::InsufficientInventory {
                        requested: quantity,
                        available: self.available_quantity,
                    });
                }
                self.available_quantity -= quantity;
                self.purchase_count = self.purchase_count.saturating_add(1);
                Ok(ListingActionResult::Sell(self.clone()))
            }
            ListingAction::Restock { quantity } => {
                if quantity == 0 {
                    return Err(ListingError::InvalidQuantity(quantity));
                }
                self.available_quantity = self
                    .available_quantity
                    .checked_add(quantity)
                    .ok_or_else(|| ListingError::Validation("stock overflow".into()))?;
                self.purchase_count = self.purchase_count.saturating_sub(1);
                Ok(ListingActionResult::Restock(self.clone()))
            }
        }
    }

    fn matches(&self, filter: &ListingFilter) -> bool {
        match filter {
            ListingFilter::All | ListingFilter::TopPurchased => true,
            ListingFilter::Name(name) => self.name == *name,
            ListingFilter::Owner(owner) => self.owner == *owner,
            ListingFilter::NameContains(pattern) => self
                .name
                .to_lowercase()
                .contains(&pattern.to_lowercase()),
        }
    }

    /// Top-purchased queries sort by counter, highest first; ties keep id order.
    fn order(a: &Self, b: &Self, filter: &ListingFilter) -> Ordering {
        match filter {
            ListingFilter::TopPurchased => b.purchase_count.cmp(&a.purchase_count),
            _ => Ordering::Equal,
        }
    }
}
