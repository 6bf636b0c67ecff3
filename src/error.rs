//! Application error type and its HTTP mapping.
//!
//! A missing mapping is [`AppError::NotFound`]; any other storage failure is
//! [`AppError::Storage`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Body returned with every 404, matching the wording of the routing fallback.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Body returned with a 500 when storage error details are redacted.
pub const REDACTED_BODY: &str = "internal server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No mapping exists for the requested key, or the key is malformed.
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// Connection failure, constraint violation or any other backend fault.
    #[error("{message}")]
    Storage { message: String, details: Value },
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    /// Replaces the public text of a storage error with [`REDACTED_BODY`].
    ///
    /// The original message is moved into `details.cause` so it still reaches
    /// the logs. Other variants are returned untouched.
    pub fn redact(self) -> Self {
        match self {
            Self::Storage { message, details } => Self::Storage {
                message: REDACTED_BODY.to_string(),
                details: json!({ "cause": message, "details": details }),
            },
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { message, details } => {
                tracing::debug!(%details, "{}", message);
                (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
            }
            AppError::Storage { message, details } => {
                tracing::error!(%details, "Storage error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Classifies a driver error, keeping the constraint name of unique violations.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::storage(
            e.to_string(),
            json!({ "kind": "unique_violation", "constraint": db.constraint() }),
        );
    }

    AppError::storage(e.to_string(), json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_message() {
        let err = AppError::storage("connection refused", json!({}));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_redact_keeps_cause_in_details() {
        let err = AppError::storage("password authentication failed", json!({ "a": 1 })).redact();

        match err {
            AppError::Storage { message, details } => {
                assert_eq!(message, REDACTED_BODY);
                assert_eq!(details["cause"], "password authentication failed");
                assert_eq!(details["details"]["a"], 1);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_redact_leaves_not_found_alone() {
        let err = AppError::not_found("no mapping", json!({})).redact();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no mapping");
    }

    #[test]
    fn test_row_not_found_is_a_storage_error() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(err.is_storage());
    }
}
