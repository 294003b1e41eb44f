use crate::auth::TokenSigner;
use crate::checkout::PurchaseOrchestrator;
use crate::clients::{ListingClient, PurchaseClient};
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared handler state. Every field is a cheap handle, so cloning per request is fine.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: PurchaseOrchestrator,
    pub listings: ListingClient,
    pub purchases: PurchaseClient,
    pub signer: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(listings: ListingClient, purchases: PurchaseClient, signer: TokenSigner) -> Self {
        Self {
            orchestrator: PurchaseOrchestrator::new(listings.clone(), purchases.clone()),
            listings,
            purchases,
            signer: Arc::new(signer),
        }
    }
}

impl FromRef<AppState> for Arc<TokenSigner> {
    fn from_ref(state: &AppState) -> Self {
        state.signer.clone()
    }
}
