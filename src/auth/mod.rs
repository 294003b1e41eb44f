//! # Identity Verification
//!
//! [`TokenSigner`] issues the session credential handed out by `POST /jwt`;
//! [`Identity`] is the axum extractor that verifies it on protected routes.
//!
//! The credential is read from the `token` cookie, or from an
//! `Authorization: Bearer <token>` header for non-browser clients.

pub mod token;

pub use token::*;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::debug;

/// Name of the cookie carrying the credential.
pub const TOKEN_COOKIE: &str = "token";

/// The verified caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == TOKEN_COOKIE && !value.is_empty()).then(|| value.to_string())
        });

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    Arc<TokenSigner>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or(AuthError::Missing)?;
        let signer = Arc::<TokenSigner>::from_ref(state);
        let email = signer.verify(&token).map_err(|e| {
            debug!(error = %e, "Rejected credential");
            e
        })?;
        Ok(Identity::new(email))
    }
}
