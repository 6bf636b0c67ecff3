//! Handler for the root greeting.

/// Greets the caller.
///
/// # Endpoint
///
/// `GET /`
///
/// Always responds `200 OK` with the body `Hello, world`.
pub async fn hello_handler() -> &'static str {
    tracing::info!("Responding request");
    "Hello, world"
}
