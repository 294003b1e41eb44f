/// Represents a food listing offered for sale.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be stored by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Listing`](#impl-ActorEntity-for-Listing) for details on:
/// - Creation parameters ([`ListingCreate`])
/// - Update parameters ([`ListingUpdate`])
/// - Inventory actions ([`ListingAction`](crate::listing_actor::ListingAction))
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u32);

impl From<u32> for ListingId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listing_{}", self.0)
    }
}

/// Accepts both the bare number (`7`) and the display form (`listing_7`).
impl FromStr for ListingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("listing_").unwrap_or(s).parse().map(Self)
    }
}

/// Descriptive fields that carry no invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingMetadata {
    pub image: Option<String>,
    pub category: Option<String>,
    pub origin: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub available_quantity: u32,
    /// Number of purchase events recorded against this listing.
    pub purchase_count: u32,
    /// E-mail of the user who created the listing.
    pub owner: String,
    pub price: f64,
    #[serde(default)]
    pub metadata: ListingMetadata,
}

impl Listing {
    /// Creates a new Listing with no purchases recorded yet.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (set by the store)
    /// * `params` - Creation payload
    pub fn new(id: ListingId, params: ListingCreate) -> Self {
        Self {
            id,
            name: params.name,
            available_quantity: params.available_quantity,
            purchase_count: 0,
            owner: params.owner,
            price: params.price,
            metadata: params.metadata,
        }
    }
}

/// Payload for creating a new listing.
///
/// Deserializable so listings can be seeded from a JSON file at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCreate {
    pub name: String,
    pub available_quantity: u32,
    pub owner: String,
    pub price: f64,
    #[serde(default)]
    pub metadata: ListingMetadata,
}

/// Owner edits. Absent fields are left untouched; the purchase counter is not editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingUpdate {
    pub name: Option<String>,
    pub available_quantity: Option<u32>,
    pub price: Option<f64>,
    pub metadata: Option<ListingMetadata>,
}

/// Queries understood by the listing store.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingFilter {
    All,
    /// Exact name match.
    Name(String),
    Owner(String),
    /// Case-insensitive substring match on the name. An empty pattern matches everything.
    NameContains(String),
    /// Every listing, ordered by purchase count, highest first.
    TopPurchased,
}
