//! Upstream clients for the askrelay HTTP relay.
//!
//! - [`UpstreamClient`] — Verbatim pass-through to the chat-completion and embeddings endpoints
//! - [`LinkFinder`] / [`OpenAiLinkFinder`] — Best-effort web-link lookup for reply augmentation
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use askrelay_config::RelayConfig;
//! use askrelay_llm::{LinkFinder, OpenAiLinkFinder, UpstreamClient};
//!
//! let config = RelayConfig::from_env()?;
//! let upstream = UpstreamClient::new(&config)?;
//! let reply = upstream.complete(&serde_json::json!({
//!     "model": "gpt-4o",
//!     "messages": [{ "role": "user", "content": "What is TCP?" }]
//! })).await?;
//!
//! let finder = OpenAiLinkFinder::new(&config, upstream.clone());
//! let links = finder.find_links("What is TCP?").await;
//! ```

mod client;
mod links;

pub use client::{RawResponse, UpstreamClient};
pub use links::{LinkFinder, OpenAiLinkFinder, LINKS_SYSTEM_PROMPT};
