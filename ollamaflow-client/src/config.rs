//! Client configuration.

use std::time::Duration;

/// Configuration for an [`OllamaFlowClient`](crate::OllamaFlowClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway endpoint URL, without a trailing slash.
    pub endpoint: String,
    /// Bearer token sent as `Authorization: Bearer …` on every request.
    pub bearer_token: Option<String>,
    /// Per-request timeout, covering the full body read.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Create a config for the given endpoint. A trailing slash is trimmed
    /// so paths can always be joined with a leading one.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bearer_token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build an HTTP client with this config.
    pub fn build_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_default()
    }
}
