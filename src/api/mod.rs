//! HTTP layer: handlers, middleware and route composition.

pub mod handlers;
pub mod middleware;
