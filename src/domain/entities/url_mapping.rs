//! URL mapping entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted association between a short code and a long URL.
///
/// Mappings are created by registration and removed by an explicit clear;
/// they are never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlMapping {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        short_code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
            updated_at,
        }
    }
}
