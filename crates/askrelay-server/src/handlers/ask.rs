//! Chat relay handler.

use std::sync::Arc;

use askrelay_core::RelayReply;
use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// Relays a chat-completion request and returns the (possibly augmented) reply.
///
/// The upstream calls run on their own task and finish even if the client
/// goes away first.
pub async fn ask(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<Value>,
) -> Result<Json<RelayReply>, AppError> {
    let reply = tokio::spawn(async move { services::ask::relay_chat(&state, body).await }).await??;
    Ok(Json(reply))
}
