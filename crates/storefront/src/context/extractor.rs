//! Axum extractor for RequestContext.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use super::types::{RequestContext, RequestId};
use crate::state::AppState;

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_cart_id(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    let jar = CookieJar::from_headers(headers);
    jar.get(cookie_name)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestContext {
            request_id: extract_request_id(&parts.headers),
            cart_id: extract_cart_id(&parts.headers, &state.cart_cookie_name),
        })
    }
}
