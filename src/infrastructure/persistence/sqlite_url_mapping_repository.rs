//! SQLite implementation of the URL mapping repository.
//!
//! Serves file-based deployments (`DATABASE_URL=sqlite://...`) and doubles as
//! the embedded store for integration tests via
//! [`SqliteUrlMappingRepository::in_memory`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

type MappingRow = (i64, String, String, DateTime<Utc>, DateTime<Utc>);

/// SQLite repository for the `url_mapping` table.
pub struct SqliteUrlMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens a private in-memory database with the schema applied.
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .synchronous(SqliteSynchronous::Off);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations/sqlite").run(&pool).await?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Underlying pool, for fixtures that need raw SQL.
    pub fn pool(&self) -> &SqlitePool {
        self.pool.as_ref()
    }
}

#[async_trait]
impl UrlMappingRepository for SqliteUrlMappingRepository {
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
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO url_mapping (url, short_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(long_url)
        .bind(code)
        .bind(now)
        .bind(now)
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
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
