//! # SavorSafari
//!
//! Backend of a food marketplace: listings with inventory, purchases, and the checkout
//! flow that keeps the two consistent.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor per collection
//! Listings and purchases each live in a [`ResourceActor`](framework::ResourceActor) that
//! owns its documents and processes requests one at a time. Inventory changes are
//! custom actions ([`ListingAction`](listing_actor::ListingAction)), so "check stock,
//! then decrement" is a single message and two buyers can never both take the last units.
//!
//! ### 2. Checkout lives outside the actors
//! [`PurchaseOrchestrator`](checkout::PurchaseOrchestrator) talks to both stores through
//! their clients: it sells first, records the purchase second, and restocks if the record
//! cannot be written.
//!
//! ### 3. Type-safe errors
//! Each store has its own error enum. Errors travel through the actor boxed and are
//! recovered by downcasting in the typed clients; the HTTP layer maps them to statuses.
//!
//! ## Module Tour
//!
//! - [`framework`]: generic actor, client and mocks
//! - [`model`]: `Listing` and `Purchase` documents
//! - [`listing_actor`], [`purchase_actor`]: the two stores
//! - [`clients`]: typed store clients
//! - [`checkout`]: the purchase flow
//! - [`auth`]: signed credentials and the `Identity` extractor
//! - [`http`]: axum routes
//! - [`config`], [`lifecycle`]: startup and shutdown
//!
//! ```bash
//! ACCESS_TOKEN_SECRET=dev RUST_LOG=info cargo run
//! ```

pub mod auth;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod http;
pub mod lifecycle;
pub mod listing_actor;
pub mod model;
pub mod purchase_actor;
