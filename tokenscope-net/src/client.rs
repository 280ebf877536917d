//! HTTP client construction
//!
//! Every provider call goes through a client built here, so each request
//! carries the same bounded timeout.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Timeout applied to every provider and search request
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Fixed user agent; a random browser agent is used when unset
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Errors from the network layer
#[derive(Debug, Error)]
pub enum NetError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid JSON body: {0}")]
    Decode(String),
}

impl NetError {
    /// Classify a failed send; connection failures and timeouts are `Unreachable`
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            NetError::Unreachable(error.to_string())
        } else {
            NetError::Request(error)
        }
    }

    /// Whether the remote end answered at all
    ///
    /// A 404 or an undecodable body still means the provider is up.
    pub fn is_response(&self) -> bool {
        matches!(self, NetError::Status(_) | NetError::Decode(_))
    }
}

/// User agents for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:137.0) Gecko/20100101 Firefox/137.0",
];

/// Get a random user agent
pub fn random_user_agent() -> &'static str {
    use rand::Rng;
    let idx = rand::thread_rng().gen_range(0..USER_AGENTS.len());
    USER_AGENTS[idx]
}

/// Create an HTTP client with the configured timeout
pub fn create_client(config: &HttpConfig) -> Result<Client, NetError> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| random_user_agent().to_string());

    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(user_agent)
        .build()
        .map_err(|e| NetError::ClientBuild(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout_secs, 15);
        assert!(config.user_agent.is_none());
        assert_eq!(config.with_timeout(3).timeout_secs, 3);
    }

    #[test]
    fn test_random_user_agent() {
        let ua = random_user_agent();
        assert!(ua.contains("Mozilla"));
    }

    #[test]
    fn test_response_errors() {
        assert!(NetError::Status(404).is_response());
        assert!(NetError::Decode("eof".into()).is_response());
        assert!(!NetError::ClientBuild("tls".into()).is_response());
        assert!(!NetError::Unreachable("connection refused".into()).is_response());
    }

    #[test]
    fn test_create_client() {
        assert!(create_client(&HttpConfig::default()).is_ok());
    }
}
