mod health;
pub mod resize;

use axum::{routing::get, Router};

/// Creates the router with all handler routes
///
/// Every path other than `/health` reaches the resize handler: API Gateway
/// prepends stage names, and only the `key` query parameter matters.
pub fn handler() -> Router {
    Router::new()
        .route("/health", get(health::handler))
        .fallback(resize::handler)
}
