//! `HashMap`-backed URL mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

/// Stub repository holding mappings in process memory.
///
/// Honors the same uniqueness contract as the SQL implementations: a second
/// registration of a code fails with [`AppError::Storage`].
#[derive(Debug, Default)]
pub struct InMemoryUrlMappingRepository {
    data: RwLock<HashMap<String, UrlMapping>>,
    next_id: AtomicI64,
}

impl InMemoryUrlMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `code -> long_url` pairs.
    pub fn with_data(initial: HashMap<String, String>) -> Self {
        let repository = Self::new();
        let now = Utc::now();

        let data = initial
            .into_iter()
            .map(|(code, long_url)| {
                let id = repository.allocate_id();
                (code.clone(), UrlMapping::new(id, code, long_url, now, now))
            })
            .collect();

        Self {
            data: RwLock::new(data),
            next_id: repository.next_id,
        }
    }

    /// Number of mappings currently held.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl UrlMappingRepository for InMemoryUrlMappingRepository {
    async fn expand(&self, code: &str) -> Result<String, AppError> {
        self.data
            .read()
            .await
            .get(code)
            .map(|mapping| mapping.long_url.clone())
            .ok_or_else(|| {
                AppError::not_found("No mapping for short code", json!({ "code": code }))
            })
    }

    async fn register(&self, long_url: &str, code: &str) -> Result<(), AppError> {
        let mut data = self.data.write().await;

        if data.contains_key(code) {
            return Err(AppError::storage(
                format!("UNIQUE constraint failed: url_mapping.short_url ({code})"),
                json!({ "kind": "unique_violation", "constraint": "idx_url_mapping_short_url" }),
            ));
        }

        let now = Utc::now();
        let mapping = UrlMapping::new(
            self.allocate_id(),
            code.to_string(),
            long_url.to_string(),
            now,
            now,
        );
        data.insert(code.to_string(), mapping);

        Ok(())
    }

    async fn clear(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.data.write().await.remove(code).is_some())
    }

    async fn find(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.data.read().await.get(code).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
