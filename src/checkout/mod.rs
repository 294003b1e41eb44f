//! # Checkout
//!
//! The purchase flow. [`PurchaseOrchestrator`] is the only code path that writes to
//! both stores: it validates the request, takes the stock with one atomic
//! [`Sell`](crate::listing_actor::ListingAction::Sell) and then records the purchase.
//! If the record cannot be stored the sale is undone with a `Restock`.

pub mod error;

pub use error::*;

use crate::clients::{ListingClient, PurchaseClient};
use crate::model::{Listing, Purchase, PurchaseCreate, PurchaseRequest};
use chrono::Utc;
use tracing::{error, info, instrument, warn};

/// A request that passed validation.
#[derive(Debug)]
struct CheckedRequest<'a> {
    quantity: u32,
    email: &'a str,
}

fn validate(request: &PurchaseRequest) -> Result<CheckedRequest<'_>, CheckoutError> {
    let quantity = request
        .quantity
        .ok_or_else(|| CheckoutError::Validation("quantity is required".into()))?;
    if quantity < 1 {
        return Err(CheckoutError::Validation(
            "quantity must be a positive integer".into(),
        ));
    }
    let quantity = u32::try_from(quantity)
        .map_err(|_| CheckoutError::Validation(format!("quantity too large: {quantity}")))?;

    let has_name = request
        .food_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if request.food_id.is_none() && !has_name {
        return Err(CheckoutError::Validation(
            "food_id or food_name is required".into(),
        ));
    }

    let email = request.email.trim();
    if email.is_empty() {
        return Err(CheckoutError::Validation("email is required".into()));
    }

    Ok(CheckedRequest { quantity, email })
}

/// Coordinates the listing and purchase stores for a single purchase.
#[derive(Clone)]
pub struct PurchaseOrchestrator {
    listings: ListingClient,
    purchases: PurchaseClient,
}

impl PurchaseOrchestrator {
    pub fn new(listings: ListingClient, purchases: PurchaseClient) -> Self {
        Self {
            listings,
            purchases,
        }
    }

    /// Purchases `request.quantity` units on behalf of `identity`.
    ///
    /// On success the listing's stock went down by the quantity, its purchase counter
    /// went up by one and exactly one purchase record exists. On any error other than
    /// [`CheckoutError::PartialFailure`] neither store changed.
    #[instrument(skip(self, request), fields(email = %request.email, quantity = ?request.quantity))]
    pub async fn purchase(
        &self,
        identity: &str,
        request: PurchaseRequest,
    ) -> Result<Purchase, CheckoutError> {
        let checked = validate(&request)?;
        if identity != checked.email {
            warn!(identity, "Caller is not the buyer");
            return Err(CheckoutError::Forbidden(
                "identity does not match buyer email".into(),
            ));
        }

        let listing = self.resolve(&request).await?;
        let sold = self.listings.sell(listing.id, checked.quantity).await?;
        info!(
            listing = %sold.id,
            available = sold.available_quantity,
            purchase_count = sold.purchase_count,
            "Inventory committed"
        );

        let params = PurchaseCreate {
            listing_id: sold.id,
            food_name: sold.name.clone(),
            buyer: checked.email.to_string(),
            buyer_name: request.buyer_name.clone(),
            quantity: checked.quantity,
            price: sold.price,
            purchased_at: Utc::now(),
        };

        match self.purchases.insert(params.clone()).await {
            Ok(id) => {
                info!(purchase = %id, "Purchase recorded");
                Ok(Purchase::new(id, params))
            }
            Err(insert_err) => {
                warn!(error = %insert_err, listing = %sold.id, "Purchase insert failed, restocking");
                match self.listings.restock(sold.id, checked.quantity).await {
                    Ok(_) => Err(CheckoutError::Storage(insert_err.to_string())),
                    Err(restock_err) => {
                        error!(
                            reconcile = true,
                            listing = %sold.id,
                            quantity = checked.quantity,
                            buyer = checked.email,
                            insert_error = %insert_err,
                            restock_error = %restock_err,
                            "Inventory taken without a purchase record"
                        );
                        Err(CheckoutError::PartialFailure {
                            listing: sold.id,
                            quantity: checked.quantity,
                            reason: restock_err.to_string(),
                        })
                    }
                }
            }
        }
    }

    /// Finds the listing by id, falling back to an exact, unambiguous name.
    async fn resolve(&self, request: &PurchaseRequest) -> Result<Listing, CheckoutError> {
        if let Some(id) = request.food_id {
            return self
                .listings
                .find_by_id(id)
                .await?
                .ok_or_else(|| CheckoutError::ListingNotFound(id.to_string()));
        }

        let name = request.food_name.as_deref().unwrap_or_default();
        let mut matches = self.listings.find_by_name(name).await?;
        match matches.len() {
            0 => Err(CheckoutError::ListingNotFound(name.to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(CheckoutError::Validation(format!(
                "ambiguous listing name ({n} matches); supply food_id"
            ))),
        }
    }
}
