//! PostgreSQL implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

type MappingRow = (i64, String, String, DateTime<Utc>, DateTime<Utc>);

/// PostgreSQL repository for the `url_mapping` table.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgUrlMappingRepository {
    pool: Arc<PgPool>,
}

impl PgUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlMappingRepository for PgUrlMappingRepository {
    async fn expand(&self, code: &str) -> Result<String, AppError> {
        let url: Option<String> =
            sqlx::query_scalar("SELECT url FROM url_mapping WHERE short_url = $1")
                .bind(code)
                .fetch_optional(self.pool.as_ref())
                .await?;

        url.ok_or_else(|| {
            AppError::not_found("No mapping for short code", json!({ "code": code }))
        })
    }

    async fn register(&self, long_url: &str, code: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO url_mapping (url, short_url) VALUES ($1, $2)")
            .bind(long_url)
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn clear(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM url_mapping WHERE short_url = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            r#"
            SELECT id, short_url, url, created_at, updated_at
            FROM url_mapping
            WHERE short_url = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(id, short_code, long_url, created_at, updated_at)| {
            UrlMapping::new(id, short_code, long_url, created_at, updated_at)
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        let _: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
