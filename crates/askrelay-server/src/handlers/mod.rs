//! HTTP route handlers for the relay.

pub mod ask;
pub mod embed;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
