use crate::auth::AuthError;
use crate::checkout::CheckoutError;
use crate::listing_actor::ListingError;
use crate::purchase_actor::PurchaseError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with. Rendered as `{"error": ..., "kind": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Malformed payload: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Checkout(e) => match e {
                CheckoutError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
                CheckoutError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
                CheckoutError::ListingNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                CheckoutError::InsufficientInventory { .. } => {
                    (StatusCode::CONFLICT, "insufficient_inventory")
                }
                CheckoutError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
                CheckoutError::PartialFailure { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "partial_failure")
                }
            },
            ApiError::Listing(e) => match e {
                ListingError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                ListingError::InsufficientInventory { .. } => {
                    (StatusCode::CONFLICT, "insufficient_inventory")
                }
                ListingError::InvalidQuantity(_) | ListingError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "validation")
                }
                ListingError::ActorCommunicationError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "storage")
                }
            },
            ApiError::Purchase(e) => match e {
                PurchaseError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                PurchaseError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
                PurchaseError::ActorCommunicationError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "storage")
                }
            },
            ApiError::Auth(AuthError::Signing(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
            ApiError::Auth(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "validation"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            error!(kind, error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string(), "kind": kind }))).into_response()
    }
}

/// Lets [`Identity`](crate::auth::Identity) reject requests directly.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
