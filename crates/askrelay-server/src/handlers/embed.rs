//! Embeddings pass-through handler.

use std::sync::Arc;

use askrelay_core::with_default_model;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::error;

use crate::error::AppError;
use crate::ServerState;

/// Forwards the body to the upstream embeddings endpoint.
///
/// The upstream status and body are returned unchanged; only the content
/// type is pinned to JSON. The upstream call is not cancelled by a client
/// disconnect.
pub async fn embed(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let body = with_default_model(body, state.config.default_embedding_model.as_deref());

    let result = tokio::spawn(async move { state.upstream.embeddings(&body).await }).await?;
    let raw = result.map_err(|e| {
        error!("Embeddings relay failed: {}", e);
        AppError::from(e)
    })?;

    Ok((raw.status, [(header::CONTENT_TYPE, "application/json")], raw.body).into_response())
}
