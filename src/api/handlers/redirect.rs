//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{ShortCode, ShortCodeError};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Request Flow
///
/// 1. Validate the code shape (12 characters of `[a-f0-9]`)
/// 2. Expand the code through the repository
/// 3. Return `302 Found` with `Location` set and an empty body
///
/// A malformed code never reaches the repository. A hex code of the wrong
/// length gets a bare 404 with an empty body.
///
/// # Errors
///
/// Returns 404 Not Found if the code has non-hex characters or is unknown.
/// Returns 500 Internal Server Error on storage failures, with the error text
/// as the body unless redaction is enabled.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let code = match ShortCode::parse(&code) {
        Ok(code) => code,
        Err(ShortCodeError::InvalidLength(len)) => {
            debug!("Rejected short code {:?} of length {}", code, len);
            return Ok(StatusCode::NOT_FOUND.into_response());
        }
        Err(e) => {
            return Err(AppError::not_found(
                "Malformed short code",
                json!({ "code": code, "reason": e.to_string() }),
            ));
        }
    };

    let long_url = state
        .repository
        .expand(code.as_str())
        .await
        .map_err(|e| state.present_error(e))?;

    debug!("Expanded {} to {}", code, long_url);

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response())
}
