//! Axum router configuration with middleware.
//!
//! API routes live under `/api/`. Middleware, outermost first: request
//! tracing, the origin gate, CORS, cache-control stamping, and response
//! compression. The static
//! marketing site is served from disk with `index.html` as the fallback;
//! HTML responses are marked non-cacheable while other assets may be
//! cached for a day. If the directory does not exist, only the API is
//! served.

use std::path::Path;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::origin;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, web_dir: &Path) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::content::health))
        .route("/capabilities", get(handlers::content::capabilities))
        .route("/updates", get(handlers::content::updates))
        .route("/chat", post(handlers::chat::chat));

    let mut router = Router::new().nest("/api", api_routes);

    // Serve the static marketing site if the directory exists. Unknown
    // paths fall through to index.html.
    if web_dir.exists() {
        let index_path = web_dir.join("index.html");
        let serve_dir = ServeDir::new(web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir.display(), "static site serving enabled");
    }

    router
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(stamp_cache_control))
        .layer(origin::cors_layer(state.policy.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            origin::enforce_origin,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Mark HTML responses non-cacheable; let other static assets be cached
/// for a day. API responses are left alone.
async fn stamp_cache_control(request: Request, next: Next) -> Response {
    let is_api = request.uri().path().starts_with("/api");
    let mut response = next.run(request).await;

    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html"));

    if is_html {
        response.headers_mut().insert(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, max-age=0, must-revalidate"),
        );
    } else if !is_api && response.status().is_success() {
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=86400"));
    }

    response
}
