/// Represents a recorded purchase.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait.
/// Purchases are immutable once stored: both `Update` and `Action` are uninhabited.
use crate::model::ListingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(pub u32);

impl From<u32> for PurchaseId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "purchase_{}", self.0)
    }
}

impl FromStr for PurchaseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("purchase_").unwrap_or(s).parse().map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub listing_id: ListingId,
    /// Listing name at the time of purchase, kept for display.
    pub food_name: String,
    /// Buyer e-mail.
    pub buyer: String,
    pub buyer_name: Option<String>,
    pub quantity: u32,
    /// Unit price at the time of purchase.
    pub price: f64,
    pub purchased_at: DateTime<Utc>,
}

impl Purchase {
    pub fn new(id: PurchaseId, params: PurchaseCreate) -> Self {
        Self {
            id,
            listing_id: params.listing_id,
            food_name: params.food_name,
            buyer: params.buyer,
            buyer_name: params.buyer_name,
            quantity: params.quantity,
            price: params.price,
            purchased_at: params.purchased_at,
        }
    }
}

/// Payload for storing a purchase. Built by the checkout flow, never by clients.
#[derive(Debug, Clone)]
pub struct PurchaseCreate {
    pub listing_id: ListingId,
    pub food_name: String,
    pub buyer: String,
    pub buyer_name: Option<String>,
    pub quantity: u32,
    pub price: f64,
    pub purchased_at: DateTime<Utc>,
}

/// Queries understood by the purchase store.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseFilter {
    All,
    Buyer(String),
}

/// Body of `POST /purchase-food-items`.
///
/// Fields are loosely typed on purpose: a missing or negative quantity must reach the
/// checkout validation and come back as a structured error, not a deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Preferred listing reference.
    pub food_id: Option<ListingId>,
    /// Fallback reference by exact listing name.
    pub food_name: Option<String>,
    #[serde(default)]
    pub email: String,
    pub buyer_name: Option<String>,
    pub quantity: Option<i64>,
}
