//! Best-effort web-link lookup used to augment chat replies.

use std::time::{Duration, Instant};

use askrelay_config::RelayConfig;
use askrelay_core::{Augmentation, RelayError};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::client::{millis, UpstreamClient};

/// Instruction sent ahead of the user's question.
pub const LINKS_SYSTEM_PROMPT: &str = "You are an assistant that searches the web for authoritative sources. For the given query, return the 3 most relevant URLs (with titles) from trustworthy sources related to the topic. Provide them as a markdown list of clickable links.";

/// Source of supplementary links for a user question.
///
/// Implementations never fail: problems are reported as
/// [`Augmentation::Unavailable`] so callers can carry on without links.
#[async_trait]
pub trait LinkFinder: Send + Sync {
    async fn find_links(&self, query: &str) -> Augmentation;
}

/// Converts any error into a RelayError::Transport.
fn llm_err(e: impl ToString) -> RelayError {
    RelayError::Transport(e.to_string())
}

/// Builds the fixed system + user prompt.
fn build_messages(query: &str) -> Result<Vec<ChatCompletionRequestMessage>, RelayError> {
    Ok(vec![
        ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(LINKS_SYSTEM_PROMPT)
                .build()
                .map_err(llm_err)?,
        ),
        ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(query)
                .build()
                .map_err(llm_err)?,
        ),
    ])
}

/// Asks an OpenAI-compatible chat model for links.
///
/// The request is typed; the response is read loosely through
/// [`UpstreamClient::complete`], so any body with
/// `choices[0].message.content` is accepted.
pub struct OpenAiLinkFinder {
    upstream: UpstreamClient,
    model: String,
    timeout: Duration,
}

impl OpenAiLinkFinder {
    /// Creates a finder using the configured links model, sending through `upstream`.
    pub fn new(config: &RelayConfig, upstream: UpstreamClient) -> Self {
        Self {
            upstream,
            model: config.links_model.clone(),
            timeout: config.upstream_timeout,
        }
    }

    /// Overrides the overall deadline for one lookup.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request_links(&self, query: &str) -> Result<String, RelayError> {
        let start = Instant::now();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(build_messages(query)?)
            .build()
            .map_err(llm_err)?;

        let links = self.upstream.complete(&serde_json::to_value(request)?).await?;
        info!("Links LLM: {}ms, {} chars", start.elapsed().as_millis(), links.len());
        Ok(links)
    }
}

#[async_trait]
impl LinkFinder for OpenAiLinkFinder {
    async fn find_links(&self, query: &str) -> Augmentation {
        let outcome = match tokio::time::timeout(self.timeout, self.request_links(query)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout(millis(self.timeout))),
        };

        match outcome {
            Ok(links) => Augmentation::Links(links),
            Err(e) => {
                warn!("Web augmentation error: {}", e);
                Augmentation::Unavailable(e.to_string())
            }
        }
    }
}
