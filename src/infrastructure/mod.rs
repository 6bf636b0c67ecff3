//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`database`] - Backend selection, pool setup, startup ping and migrations
//! - [`persistence`] - Repository implementations

pub mod database;
pub mod persistence;
