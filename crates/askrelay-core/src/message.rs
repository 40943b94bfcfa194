//! Read-only view over the caller's chat payload.
//!
//! The relay forwards the raw JSON body untouched; these types only exist to
//! pull the last user message out of it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role tag of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    Developer,
    User,
    Assistant,
    Tool,
    /// Any tag the relay does not know about.
    #[serde(other)]
    Other,
}

/// A content part (`{"type": "text", "text": "..."}` and friends).
///
/// A part without a `type` is read as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ContentPart {
    fn as_text(&self) -> Option<&str> {
        match self.kind.as_deref() {
            None | Some("text") => self.text.as_deref(),
            Some(_) => None,
        }
    }
}

/// Message content: plain text, an array of parts, or anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(Value),
}

impl MessageContent {
    /// Flattens the content into plain text. Non-text parts and
    /// unrecognized shapes yield nothing.
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(t) => t.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(ContentPart::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
            MessageContent::Other(_) => String::new(),
        }
    }
}

/// A single message in the caller's `messages` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Returns the message text, empty when the content is null or missing.
    pub fn text(&self) -> String {
        self.content.as_ref().map(MessageContent::text).unwrap_or_default()
    }
}

/// Returns the content of the last `user` message in `body.messages`.
///
/// The last entry with `"role": "user"` wins whatever its content looks like;
/// content that is neither a string nor an array of text parts reads as empty.
/// Entries without a user role are skipped. Returns an empty string when there
/// is no user message.
pub fn last_user_message(body: &Value) -> String {
    body.get("messages")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|m| m.get("role").and_then(Value::as_str) == Some("user"))
        .last()
        .and_then(|m| Message::deserialize(m).ok())
        .map(|m| m.text())
        .unwrap_or_default()
}

/// Inserts `model` into a JSON object body that does not carry one.
///
/// Bodies that already name a model, and non-object bodies, are left alone.
pub fn with_default_model(mut body: Value, model: Option<&str>) -> Value {
    let Some(model) = model else {
        return body;
    };
    if let Value::Object(map) = &mut body {
        map.entry("model").or_insert_with(|| Value::String(model.to_string()));
    }
    body
}
