//! Reply composition for the chat relay.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder reply when the primary completion carries no content.
pub const FALLBACK_REPLY: &str = "⚠️ AI failed to respond.";

/// Separator and heading placed between the reply and the link list.
pub const RESOURCES_HEADING: &str = "\n\n---\n🌐 **Additional resources found online:**\n";

/// Outcome of the best-effort web-link lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Augmentation {
    /// Markdown link list returned by the upstream.
    Links(String),
    /// The lookup failed or was skipped; carries the reason for logging.
    Unavailable(String),
}

impl Augmentation {
    /// Returns the link text when there is something to append.
    pub fn links(&self) -> Option<&str> {
        match self {
            Augmentation::Links(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Appends the link list to `primary` when the lookup produced one.
pub fn compose_reply(primary: String, augmentation: &Augmentation) -> String {
    match augmentation.links() {
        Some(links) => format!("{primary}{RESOURCES_HEADING}{links}"),
        None => primary,
    }
}

/// Reads `choices[0].message.content` from an upstream completion body.
///
/// Returns `None` when any step is missing or the content is not a string.
pub fn primary_content(upstream: &Value) -> Option<String> {
    upstream
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(String::from)
}

/// Single-choice completion shape returned by `/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    pub choices: Vec<ReplyChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyChoice {
    pub message: ReplyMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMessage {
    pub content: String,
}

impl RelayReply {
    /// Wraps `content` as the only choice.
    pub fn single(content: impl Into<String>) -> Self {
        Self {
            choices: vec![ReplyChoice { message: ReplyMessage { content: content.into() } }],
        }
    }

    /// Content of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn links_are_appended_under_heading() {
        let reply = compose_reply(
            "TCP is a transport protocol.".into(),
            &Augmentation::Links("- [RFC 9293](https://www.rfc-editor.org/rfc/rfc9293)".into()),
        );
        assert_eq!(
            reply,
            "TCP is a transport protocol.\n\n---\n🌐 **Additional resources found online:**\n- [RFC 9293](https://www.rfc-editor.org/rfc/rfc9293)"
        );
    }

    #[test]
    fn empty_links_are_not_appended() {
        let reply = compose_reply("answer".into(), &Augmentation::Links(String::new()));
        assert_eq!(reply, "answer");
    }

    #[test]
    fn unavailable_leaves_reply_untouched() {
        let reply = compose_reply("answer".into(), &Augmentation::Unavailable("connection refused".into()));
        assert_eq!(reply, "answer");
    }

    #[test]
    fn primary_content_reads_first_choice() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "one" } },
                { "message": { "role": "assistant", "content": "two" } }
            ]
        });
        assert_eq!(primary_content(&body).as_deref(), Some("one"));
    }

    #[test]
    fn primary_content_missing_pieces() {
        assert_eq!(primary_content(&json!({})), None);
        assert_eq!(primary_content(&json!({ "choices": [] })), None);
        assert_eq!(primary_content(&json!({ "choices": [{}] })), None);
        assert_eq!(primary_content(&json!({ "choices": [{ "message": { "content": null } }] })), None);
        assert_eq!(
            primary_content(&json!({ "error": { "message": "invalid api key" } })),
            None
        );
    }

    #[test]
    fn reply_serializes_as_single_choice() {
        let reply = RelayReply::single("hi");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({ "choices": [{ "message": { "content": "hi" } }] })
        );
        assert_eq!(reply.content(), Some("hi"));
    }
}
