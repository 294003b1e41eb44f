use super::error::ApiError;
use super::state::AppState;
use crate::auth::{Identity, TOKEN_COOKIE};
use crate::model::{Listing, Purchase, PurchaseId, PurchaseRequest};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

/// Number of listings returned by `GET /top-purchased-foods`.
pub const TOP_PURCHASED_LIMIT: usize = 6;

pub async fn root() -> &'static str {
    "SavorSafari server is running"
}

#[instrument(skip_all, fields(caller = identity.email()))]
pub async fn create_purchase(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Purchase>), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let purchase = state
        .orchestrator
        .purchase(identity.email(), request)
        .await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

pub async fn list_purchases(
    State(state): State<AppState>,
) -> Result<Json<Vec<Purchase>>, ApiError> {
    Ok(Json(state.purchases.find_all().await?))
}

#[instrument(skip_all, fields(caller = identity.email(), buyer = %email))]
pub async fn purchases_by_buyer(
    State(state): State<AppState>,
    identity: Identity,
    Path(email): Path<String>,
) -> Result<Json<Vec<Purchase>>, ApiError> {
    if identity.email() != email {
        return Err(ApiError::Forbidden(
            "purchases of another buyer".into(),
        ));
    }
    Ok(Json(state.purchases.find_by_buyer(&email).await?))
}

/// Removes one of the caller's own purchase records. Listings are left as they are.
#[instrument(skip_all, fields(caller = identity.email(), key = %id))]
pub async fn delete_purchase(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: PurchaseId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid purchase id: {id}")))?;

    let purchase = state
        .purchases
        .find_by_id(id)
        .await?
        .ok_or_else(|| crate::purchase_actor::PurchaseError::NotFound(id.to_string()))?;
    if purchase.buyer != identity.email() {
        return Err(ApiError::Forbidden("purchase of another buyer".into()));
    }

    state.purchases.delete_by_id(id).await?;
    info!(purchase = %id, "Purchase deleted");
    Ok(Json(json!({ "deleted": id })))
}

pub async fn top_purchased(
    State(state): State<AppState>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    Ok(Json(state.listings.top_purchased(TOP_PURCHASED_LIMIT).await?))
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// Issues the credential cookie for `email`.
#[instrument(skip_all)]
pub async fn issue_token(
    State(state): State<AppState>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let email = request.email.trim();
    if email.is_empty() {
        return Err(ApiError::BadRequest("email is required".into()));
    }

    let token = state.signer.issue(email)?;
    let cookie = format!(
        "{TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        state.signer.ttl().num_seconds()
    );
    info!(email, "Credential issued");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "success": true })),
    ))
}

pub async fn logout() -> impl IntoResponse {
    let cookie = format!("{TOKEN_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0");
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "success": true })),
    )
}
