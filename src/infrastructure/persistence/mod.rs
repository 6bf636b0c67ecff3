//! Repository implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::UrlMappingRepository`]
//! using runtime-checked SQLx queries, plus an in-process stub.
//!
//! # Repositories
//!
//! - [`PgUrlMappingRepository`] - PostgreSQL, the production backend
//! - [`SqliteUrlMappingRepository`] - SQLite, file-based or in-memory
//! - [`InMemoryUrlMappingRepository`] - `HashMap` stub for unit-level tests

pub mod memory_url_mapping_repository;
pub mod pg_url_mapping_repository;
pub mod sqlite_url_mapping_repository;

pub use memory_url_mapping_repository::InMemoryUrlMappingRepository;
pub use pg_url_mapping_repository::PgUrlMappingRepository;
pub use sqlite_url_mapping_repository::SqliteUrlMappingRepository;
