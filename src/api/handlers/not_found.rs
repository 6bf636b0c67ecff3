//! Fallback for unmatched routes.

use axum::http::StatusCode;

use crate::error::NOT_FOUND_BODY;

/// Responds `404 Not Found` with the same body as a missing short code.
pub async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
