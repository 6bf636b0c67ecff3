//! Database connection setup.
//!
//! Picks the backend from the connection string scheme, opens a bounded pool,
//! pings it, applies the embedded migrations and hands back the matching
//! repository behind the [`UrlMappingRepository`] trait.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::config::{Config, mask_connection_string};
use crate::domain::repositories::UrlMappingRepository;
use crate::infrastructure::persistence::{PgUrlMappingRepository, SqliteUrlMappingRepository};

/// Storage engine behind a connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    /// Detects the backend from the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns an error for any scheme other than `postgres://`,
    /// `postgresql://` or `sqlite:`.
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            anyhow::bail!(
                "Unsupported database URL '{}': expected postgres://, postgresql:// or sqlite:",
                mask_connection_string(url)
            )
        }
    }
}

/// Connects to the configured database and returns a ready repository.
///
/// Connection and ping are retried with jittered exponential backoff, up to
/// `config.db_connect_retries` extra attempts.
///
/// # Errors
///
/// Returns an error if the URL is unsupported, every attempt fails, or
/// migrations cannot be applied.
pub async fn connect_repository(config: &Config) -> Result<Arc<dyn UrlMappingRepository>> {
    let backend = DatabaseBackend::from_url(&config.database_url)?;

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries);

    let repository = Retry::spawn(strategy, move || async move {
        let attempt = open(backend, config).await;
        if let Err(e) = &attempt {
            tracing::warn!("Database not ready ({:?}): {:#}", backend, e);
        }
        attempt
    })
    .await
    .with_context(|| {
        format!(
            "Failed to connect to {}",
            mask_connection_string(&config.database_url)
        )
    })?;

    tracing::info!("Connected to database ({:?})", backend);

    Ok(repository)
}

async fn open(backend: DatabaseBackend, config: &Config) -> Result<Arc<dyn UrlMappingRepository>> {
    match backend {
        DatabaseBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .min_connections(config.db_min_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(&config.database_url)
                .await?;

            let repository = PgUrlMappingRepository::new(Arc::new(pool.clone()));
            repository.ping().await?;

            sqlx::migrate!("./migrations/postgres")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            Ok(Arc::new(repository))
        }
        DatabaseBackend::Sqlite => {
            let in_memory = is_in_memory_sqlite(&config.database_url);
            let mut options = SqliteConnectOptions::from_str(&config.database_url)?
                .create_if_missing(true)
                .busy_timeout(Duration::from_secs(5));

            // An in-memory database lives only as long as its one connection.
            let pool_options = if in_memory {
                SqlitePoolOptions::new()
                    .min_connections(1)
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                options = options.journal_mode(SqliteJournalMode::Wal);
                SqlitePoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .min_connections(config.db_min_connections)
                    .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                    .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            };

            let pool = pool_options
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect_with(options)
                .await?;

            let repository = SqliteUrlMappingRepository::new(Arc::new(pool.clone()));
            repository.ping().await?;

            sqlx::migrate!("./migrations/sqlite")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            Ok(Arc::new(repository))
        }
    }
}

/// Whether a `sqlite:` URL names an in-memory database.
pub fn is_in_memory_sqlite(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
