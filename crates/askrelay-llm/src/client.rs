//! Pass-through client for the upstream chat-completion and embeddings endpoints.
//!
//! Bodies are forwarded as raw JSON so that any field the upstream accepts
//! survives the trip, including ones this crate has never heard of.

use std::time::{Duration, Instant};

use askrelay_config::RelayConfig;
use askrelay_core::{primary_content, RelayError};
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use tracing::{debug, info};

/// Status and body exactly as the upstream sent them.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub(crate) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Converts a reqwest failure into a RelayError.
fn transport_err(e: reqwest::Error, timeout: Duration) -> RelayError {
    if e.is_timeout() {
        return RelayError::Timeout(millis(timeout));
    }
    RelayError::Transport(e.to_string())
}

/// Client for the bearer-authenticated upstream API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    api_key: Secret<String>,
    chat_url: String,
    embeddings_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Creates a client from the relay configuration.
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| transport_err(e, config.upstream_timeout))?;

        Ok(Self::with_http_client(http, config))
    }

    /// Creates a client around an existing connection pool.
    pub fn with_http_client(http: Client, config: &RelayConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            chat_url: config.chat_completions_url(),
            embeddings_url: config.embeddings_url(),
            timeout: config.upstream_timeout,
        }
    }

    /// POSTs `body` to `url` and returns whatever came back.
    async fn forward(&self, url: &str, body: &Value) -> Result<RawResponse, RelayError> {
        let start = Instant::now();

        let response = self
            .http
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| transport_err(e, self.timeout))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport_err(e, self.timeout))?;

        info!(
            "Upstream {}: {} in {}ms ({} bytes)",
            url,
            status.as_u16(),
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(RawResponse { status, body })
    }

    /// Forwards a chat-completion request verbatim and returns the first choice's content.
    pub async fn complete(&self, body: &Value) -> Result<String, RelayError> {
        let raw = self.forward(&self.chat_url, body).await?;

        if !raw.status.is_success() {
            return Err(RelayError::UpstreamStatus {
                status: raw.status.as_u16(),
                body: String::from_utf8_lossy(&raw.body).into_owned(),
            });
        }

        let parsed: Value = serde_json::from_slice(&raw.body)?;
        debug!("Chat completion response: {}", parsed);

        primary_content(&parsed).ok_or(RelayError::EmptyContent)
    }

    /// Forwards an embeddings request verbatim.
    pub async fn embeddings(&self, body: &Value) -> Result<RawResponse, RelayError> {
        self.forward(&self.embeddings_url, body).await
    }
}
