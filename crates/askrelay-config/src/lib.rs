//! Process configuration for askrelay.
//!
//! Configuration is read once at startup from the environment (after
//! `dotenvy` has loaded any `.env` file) and is immutable afterwards:
//!
//! - [`RelayConfig`] — Everything the server and the upstream clients need
//! - [`ConfigError`] — Missing or unparsable variables
//!
//! # Example
//!
//! ```rust
//! use askrelay_config::RelayConfig;
//!
//! let config = RelayConfig::from_lookup(|key| match key {
//!     "OPENAI_API_KEY" => Some("sk-test".to_string()),
//!     "RELAY_PORT" => Some("8080".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.bind_addr(), "0.0.0.0:8080");
//! assert_eq!(config.links_model, "gpt-4o");
//! ```

use std::str::FromStr;
use std::time::Duration;

use secrecy::Secret;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5500;
pub const DEFAULT_LINKS_MODEL: &str = "gpt-4o";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Errors that can occur when reading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required variable is not set (or is empty).
    #[error("Missing required environment variable '{0}'")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("Invalid value for '{key}': '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable relay configuration shared by all request handlers.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Bearer credential for the upstream API.
    pub api_key: Secret<String>,
    /// Upstream base URL, without trailing slash (e.g. `https://api.openai.com/v1`).
    pub api_base: String,
    pub host: String,
    pub port: u16,
    /// Model used for the web-link lookup, independent of the caller's model.
    pub links_model: String,
    /// Whether `/ask` performs the web-link lookup at all.
    pub augment: bool,
    /// Surface primary-call failures as `502` instead of the fallback reply.
    pub strict_primary: bool,
    pub upstream_timeout: Duration,
    /// Model inserted into `/ask` bodies that carry none.
    pub default_chat_model: Option<String>,
    /// Model inserted into `/embed` bodies that carry none.
    pub default_embedding_model: Option<String>,
}

impl RelayConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;
        let api_base = get("OPENAI_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: Secret::new(api_key),
            api_base,
            host: get("RELAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("RELAY_PORT", get("RELAY_PORT"), DEFAULT_PORT)?,
            links_model: get("RELAY_LINKS_MODEL").unwrap_or_else(|| DEFAULT_LINKS_MODEL.to_string()),
            augment: parse_flag("RELAY_AUGMENT", get("RELAY_AUGMENT"), true)?,
            strict_primary: parse_flag("RELAY_STRICT_PRIMARY", get("RELAY_STRICT_PRIMARY"), false)?,
            upstream_timeout: Duration::from_secs(parse_or(
                "RELAY_UPSTREAM_TIMEOUT_SECS",
                get("RELAY_UPSTREAM_TIMEOUT_SECS"),
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?),
            default_chat_model: get("RELAY_DEFAULT_CHAT_MODEL"),
            default_embedding_model: get("RELAY_DEFAULT_EMBEDDING_MODEL"),
        })
    }

    /// Creates a configuration pointing at `api_base` with every other field defaulted.
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            links_model: DEFAULT_LINKS_MODEL.to_string(),
            augment: true,
            strict_primary: false,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            default_chat_model: None,
            default_embedding_model: None,
        }
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    pub fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.api_base)
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value: v,
        }),
    }
}

fn parse_flag(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: v,
            reason: "expected a boolean".into(),
        }),
    }
}
