//! Shared helpers for driving the relay router against a mocked upstream.

#![allow(dead_code)]

use std::sync::Arc;

use askrelay_config::RelayConfig;
use askrelay_llm::LINKS_SYSTEM_PROMPT;
use askrelay_server::{build_router, ServerState};
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Model the tests' callers ask for; distinct from the links model.
pub const CALLER_MODEL: &str = "gpt-4o-mini";

/// Relay configuration pointing at the mock upstream.
pub fn config_for(server: &MockServer) -> RelayConfig {
    RelayConfig::new("sk-test", format!("{}/v1", server.uri()))
}

/// Router wired to the mock upstream.
pub fn app_for(config: RelayConfig) -> Router {
    let state = ServerState::new(config).expect("failed to build server state");
    build_router(Arc::new(state))
}

/// Full OpenAI-shaped completion carrying `content`.
pub fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
    })
}

/// Mocks the caller's (primary) chat completion, recognized by its model.
pub async fn mock_primary(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(format!("\"model\":\"{CALLER_MODEL}\"")))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Mocks the web-link completion, recognized by its system prompt.
pub async fn mock_links(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("authoritative sources"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Bodies of every link lookup the upstream received.
pub async fn link_requests(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
        .filter(|b| b["messages"][0]["content"] == LINKS_SYSTEM_PROMPT)
        .collect()
}

/// Sends a JSON POST through the router.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, HeaderMap, Bytes) {
    post_raw(app, uri, body.to_string()).await
}

/// Sends a raw-body JSON POST through the router.
pub async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, HeaderMap, Bytes) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes)
}

/// Reads the first choice's content from a `/ask` reply body.
pub fn reply_content(body: &Bytes) -> String {
    let value: Value = serde_json::from_slice(body).expect("reply is not JSON");
    value["choices"][0]["message"]["content"]
        .as_str()
        .expect("reply has no content")
        .to_string()
}
