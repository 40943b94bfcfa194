//! HTTP relay server: router setup and shared state.
//!
//! Routes:
//!
//! - `POST /ask` — chat relay with web-link augmentation
//! - `POST /embed` — embeddings pass-through
//! - `GET /health` — liveness probe

pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use askrelay_config::RelayConfig;
use askrelay_core::RelayError;
use askrelay_llm::{LinkFinder, OpenAiLinkFinder, UpstreamClient};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub config: RelayConfig,
    pub upstream: UpstreamClient,
    pub links: Box<dyn LinkFinder>,
}

impl ServerState {
    /// Builds the upstream clients from configuration. Both share one connection pool.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let upstream = UpstreamClient::new(&config)?;
        let links = OpenAiLinkFinder::new(&config, upstream.clone());

        Ok(Self {
            config,
            upstream,
            links: Box::new(links),
        })
    }

    /// Replaces the web-link source.
    pub fn with_link_finder(mut self, links: impl LinkFinder + 'static) -> Self {
        self.links = Box::new(links);
        self
    }
}

/// Builds the application router with CORS and request tracing.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/ask", post(handlers::ask::ask))
        .route("/embed", post(handlers::embed::embed))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
