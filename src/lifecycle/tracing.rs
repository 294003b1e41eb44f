//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` fmt layer filtered by `RUST_LOG`.
//!
//! The compact format hides module paths (`with_target(false)`); the store actors
//! tag every event with `entity_type` instead, so lines stay short:
//!
//! ```text
//! INFO Actor started entity_type="Listing"
//! INFO purchase{email=a@b.com quantity=Some(3)}: Inventory committed listing=listing_1 available=2 purchase_count=3
//! INFO purchase{email=a@b.com quantity=Some(3)}: Created entity_type="Purchase" id=purchase_1 size=1
//! ```
//!
//! ```bash
//! # Request spans, checkout events and actor lifecycle
//! RUST_LOG=info cargo run
//!
//! # Full payloads of every store request
//! RUST_LOG=debug cargo run
//!
//! # Only the stores
//! RUST_LOG=savor_safari::framework=debug cargo run
//! ```
//!
//! Events that need manual reconciliation are logged at `error` level with
//! `reconcile=true`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
