//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short code to long URL association
//! - [`ShortCode`] - The validated lookup key

pub mod short_code;
pub mod url_mapping;

pub use short_code::{SHORT_CODE_LENGTH, ShortCode, ShortCodeError};
pub use url_mapping::UrlMapping;
