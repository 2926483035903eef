//! Client Configuration

use serde::Deserialize;

/// API origin used when nothing is configured at build time
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Storage key for the access token
pub const DEFAULT_TOKEN_KEY: &str = "access_token";

/// Messages requested when loading a conversation (server caps at 100)
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
const MAX_HISTORY_LIMIT: u32 = 100;

/// Settings for [`crate::ApiClient`] and the session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash
    pub api_url: String,
    /// Key under which the access token is persisted
    pub token_key: String,
    /// Message cap for conversation history loads
    pub history_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Configuration baked in at compile time.
    ///
    /// A WASM bundle has no process environment, so `TASKFLOW_API_URL` is
    /// read when the crate is built.
    pub fn from_build_env() -> Self {
        let config = Self::default();
        match option_env!("TASKFLOW_API_URL") {
            Some(url) if !url.trim().is_empty() => config.with_api_url(url),
            _ => config,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    /// History limit clamped to what the server accepts
    pub fn effective_history_limit(&self) -> u32 {
        self.history_limit.clamp(1, MAX_HISTORY_LIMIT)
    }
}
