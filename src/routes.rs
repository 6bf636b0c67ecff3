//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /`          - Static greeting
//! - `GET /s/{code}`  - Short link redirect
//! - anything else    - `404 page not found`
//!
//! Every request runs inside the tracing middleware from
//! [`crate::api::middleware::tracing`].

use axum::Router;
use axum::routing::get;

use crate::api::handlers::{hello_handler, not_found_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_handler))
        .route("/s/{code}", get(redirect_handler))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}
