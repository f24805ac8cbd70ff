//! Origin enforcement middleware and the matching CORS layer.
//!
//! The gate runs before any route handler (static files included) and
//! rejects disallowed origins with `403 {"error":"Origin not allowed"}`.
//! Allowed cross-origin requests then pass through a credentialed
//! [`CorsLayer`] whose predicate mirrors the same policy, so allowed
//! origins are echoed back and everything else gets no CORS headers.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::ORIGIN;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use worksg_core::origin::OriginPolicy;

use crate::http::error::AppError;
use crate::state::AppState;

/// Reject requests whose declared origin fails the allow-list.
///
/// Absent origins (same-origin or non-browser clients) pass through; a
/// present but non-UTF-8 origin header is treated as denied.
pub async fn enforce_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match request.headers().get(ORIGIN) {
        None => next.run(request).await,
        Some(value) => match value.to_str() {
            Ok(origin) if state.policy.is_allowed(Some(origin)) => next.run(request).await,
            Ok(origin) => {
                warn!(origin, "rejected request from disallowed origin");
                AppError::OriginDenied.into_response()
            }
            Err(_) => {
                warn!("rejected request with malformed origin header");
                AppError::OriginDenied.into_response()
            }
        },
    }
}

/// Build the CORS layer backed by the shared origin policy.
pub fn cors_layer(policy: Arc<OriginPolicy>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts| {
                policy.is_allowed(origin.to_str().ok())
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
