//! HTTP server entry point.
//!
//! Loads `.env`, reads the relay configuration, and serves the router on
//! the configured address (port 5500 unless overridden).

use std::sync::Arc;

use anyhow::Result;
use askrelay_config::RelayConfig;
use askrelay_server::{build_router, ServerState};
use secrecy::ExposeSecret;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = RelayConfig::from_env()?;

    info!(
        "Upstream: {} (api_key_len={})",
        config.api_base,
        config.api_key.expose_secret().len()
    );
    if config.augment {
        info!("Web augmentation enabled (model: {})", config.links_model);
    } else {
        warn!("Web augmentation disabled");
    }
    if config.strict_primary {
        info!("Strict mode: primary completion failures return 502");
    }

    let addr = config.bind_addr();
    let state = Arc::new(ServerState::new(config)?);
    let app = build_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
