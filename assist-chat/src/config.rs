//! Configuration for the proxy server, the backend client, and search
//! behavior. Everything has a local-development default; deployment
//! overrides come from `ASSISTCHAT_*` environment variables.

use std::time::Duration;

use crate::error::{AssistChatError, Result};

/// Hard cap on the per-search result count.
pub const MAX_RESULT_LIMIT: usize = 50;

/// Where the proxy listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8088 }
    }
}

impl ServerConfig {
    /// Defaults overridden by `ASSISTCHAT_HOST` / `ASSISTCHAT_PORT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("ASSISTCHAT_HOST").unwrap_or(defaults.host),
            port: std::env::var("ASSISTCHAT_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

/// How to reach the retrieval backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, no trailing slash required.
    pub base_url: String,
    /// Uniform per-call timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// The local default unless `ASSISTCHAT_BACKEND_URL` names a deployed
    /// backend.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("ASSISTCHAT_BACKEND_URL").unwrap_or(defaults.base_url),
            timeout: defaults.timeout,
        }
    }
}

/// Knobs for the search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) are silently ignored.
    pub min_query_length: usize,
    /// Result count cap sent with every search request.
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { min_query_length: 1, result_limit: 20 }
    }
}

impl SearchConfig {
    /// Create a new builder for constructing a [`SearchConfig`].
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`SearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Set the minimum trimmed query length that triggers a search.
    pub fn min_query_length(mut self, length: usize) -> Self {
        self.config.min_query_length = length;
        self
    }

    /// Set the result count cap sent with every request.
    pub fn result_limit(mut self, limit: usize) -> Self {
        self.config.result_limit = limit;
        self
    }

    /// Build the [`SearchConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`AssistChatError::Config`] if:
    /// - `result_limit == 0`
    /// - `result_limit > MAX_RESULT_LIMIT`
    /// - `min_query_length == 0`
    pub fn build(self) -> Result<SearchConfig> {
        if self.config.result_limit == 0 {
            return Err(AssistChatError::Config(
                "result_limit must be greater than zero".to_string(),
            ));
        }
        if self.config.result_limit > MAX_RESULT_LIMIT {
            return Err(AssistChatError::Config(format!(
                "result_limit ({}) must not exceed {MAX_RESULT_LIMIT}",
                self.config.result_limit
            )));
        }
        if self.config.min_query_length == 0 {
            return Err(AssistChatError::Config(
                "min_query_length must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
