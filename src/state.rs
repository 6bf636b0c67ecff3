//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn UrlMappingRepository>,
    pub redact_storage_errors: bool,
}

impl AppState {
    pub fn new(repository: Arc<dyn UrlMappingRepository>) -> Self {
        Self {
            repository,
            redact_storage_errors: false,
        }
    }

    /// Hides storage error text in 500 responses.
    pub fn with_redacted_errors(mut self, redact: bool) -> Self {
        self.redact_storage_errors = redact;
        self
    }

    /// Prepares a repository error for the HTTP response.
    pub fn present_error(&self, err: AppError) -> AppError {
        if self.redact_storage_errors {
            err.redact()
        } else {
            err
        }
    }
}
