//! Chat relay service: primary completion plus best-effort link augmentation.

use askrelay_core::{
    compose_reply, last_user_message, with_default_model, Augmentation, RelayReply, FALLBACK_REPLY,
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::ServerState;

/// Forwards `body` upstream and builds the relay reply.
///
/// The primary completion and the link lookup run concurrently; the lookup
/// only needs the last user message, which is known before either call.
/// A failed lookup never fails the request. A failed primary call degrades
/// to [`FALLBACK_REPLY`] unless strict mode is on.
pub async fn relay_chat(state: &ServerState, body: Value) -> Result<RelayReply, AppError> {
    let query = last_user_message(&body);
    let body = with_default_model(body, state.config.default_chat_model.as_deref());

    info!("Ask request: {}...", query.get(..50).unwrap_or(&query));

    let (primary, augmentation) = tokio::join!(state.upstream.complete(&body), augment(state, &query));

    let content = match primary {
        Ok(content) => content,
        Err(e) if state.config.strict_primary => {
            error!("Primary completion failed: {}", e);
            return Err(AppError::from(e));
        }
        Err(e) => {
            warn!("Primary completion failed, using fallback: {}", e);
            FALLBACK_REPLY.to_string()
        }
    };

    if let Augmentation::Unavailable(reason) = &augmentation {
        info!("Reply sent without links: {}", reason);
    }

    Ok(RelayReply::single(compose_reply(content, &augmentation)))
}

async fn augment(state: &ServerState, query: &str) -> Augmentation {
    if !state.config.augment {
        return Augmentation::Unavailable("augmentation disabled".into());
    }
    state.links.find_links(query).await
}
