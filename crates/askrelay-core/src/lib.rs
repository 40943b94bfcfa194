//! Core domain types and error definitions for askrelay.
//!
//! This crate holds everything the relay needs that does not touch the network:
//!
//! - [`RelayError`] — Error type for upstream calls
//! - [`Message`], [`MessageRole`] and [`last_user_message`] — Reading the caller's chat payload
//! - [`Augmentation`] and [`compose_reply`] — Building the reply returned by `/ask`
//! - [`with_default_model`] — Optional `model` fill-in for forwarded bodies
//!
//! # Example
//!
//! ```rust
//! use askrelay_core::{compose_reply, last_user_message, Augmentation};
//! use serde_json::json;
//!
//! let body = json!({
//!     "messages": [
//!         { "role": "user", "content": "What is UDP?" },
//!         { "role": "assistant", "content": "A datagram protocol." },
//!         { "role": "user", "content": "What is TCP?" }
//!     ]
//! });
//! assert_eq!(last_user_message(&body), "What is TCP?");
//!
//! let reply = compose_reply("TCP is a transport protocol.".into(), &Augmentation::Unavailable("timeout".into()));
//! assert_eq!(reply, "TCP is a transport protocol.");
//! ```

mod message;
mod reply;

pub use message::{last_user_message, with_default_model, ContentPart, Message, MessageContent, MessageRole};
pub use reply::{
    compose_reply, primary_content, Augmentation, RelayReply, ReplyChoice, ReplyMessage, FALLBACK_REPLY,
    RESOURCES_HEADING,
};

use thiserror::Error;

/// Errors that can occur while talking to the upstream API.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The request never produced a response (connect, TLS, body read).
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status.
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream body could not be interpreted.
    #[error("Failed to parse upstream response: {0}")]
    Parse(String),

    /// The upstream response carried no assistant content.
    #[error("Upstream response had no content")]
    EmptyContent,

    /// The call did not finish within its deadline.
    #[error("Upstream call timed out after {0} ms")]
    Timeout(u64),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Parse(err.to_string())
    }
}
