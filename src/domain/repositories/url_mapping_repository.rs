//! Repository trait for URL mapping data access.

use crate::domain::entities::UrlMapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the short code to long URL mapping.
///
/// All operations are stateless point queries keyed by the short code.
/// Codes are passed through as-is; shape validation belongs to callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteUrlMappingRepository`] - SQLite (file or in-memory)
/// - [`crate::infrastructure::persistence::InMemoryUrlMappingRepository`] - `HashMap` stub
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Returns the long URL registered under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists.
    /// Returns [`AppError::Storage`] on database errors.
    async fn expand(&self, code: &str) -> Result<String, AppError>;

    /// Registers `long_url` under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if `code` is already registered
    /// (uniqueness constraint) or on any other database error.
    async fn register(&self, long_url: &str, code: &str) -> Result<(), AppError>;

    /// Deletes the mapping for `code`.
    ///
    /// Returns `Ok(true)` if a mapping was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn clear(&self, code: &str) -> Result<bool, AppError>;

    /// Fetches the full row for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find(&self, code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Round-trips a trivial query to check connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the backend cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
