//! Domain layer: the URL mapping entity, the short code type and the
//! repository contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP or persistence layers;
//! repository traits are implemented in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
