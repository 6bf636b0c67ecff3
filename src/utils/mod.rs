//! Helper functions shared by the binaries.
//!
//! - [`code_generator`] - Random short code generation

pub mod code_generator;
