//! Custom actions for the Listing actor.
//!
//! Inventory changes never go through a plain update: they are actions, so the check
//! and the write run inside a single actor turn. See
//! [`impl ActorEntity for Listing`](crate::model::Listing#impl-ActorEntity-for-Listing).

use crate::model::Listing;

/// Inventory operations on a single listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes `quantity` units out of stock and records one purchase event.
    ///
    /// # Errors
    /// Fails without mutating anything if `quantity` is zero or exceeds the stock.
    Sell { quantity: u32 },
    /// Puts `quantity` units back and withdraws one purchase event.
    ///
    /// Used to compensate a `Sell` whose purchase record could not be stored.
    Restock { quantity: u32 },
}

/// Results from ListingActions - variants match 1:1 with ListingAction
#[derive(Debug, Clone, PartialEq)]
pub enum ListingActionResult {
    CheckStock(u32),
    /// The listing as it is after the sale.
    Sell(Listing),
    Restock(Listing),
}
