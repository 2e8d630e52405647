//! Bearer-credential extraction.
//!
//! The credential is opaque to this service: it is lifted out of the
//! `Authorization` header and forwarded unchanged to the management API.
//! A missing or malformed header short-circuits the request before any
//! upstream call happens.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::Json;

use crate::error::ErrorResponse;

pub struct BearerToken(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) if !token.is_empty() => Ok(BearerToken(token.to_string())),
            _ => Err((StatusCode::UNAUTHORIZED, Json(ErrorResponse::unauthorized()))),
        }
    }
}
