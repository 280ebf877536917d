//! JSON fetching
//!
//! Providers depend on [`JsonFetcher`] rather than on reqwest directly.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::{create_client, HttpConfig, NetError};

/// Fetches a URL and decodes the body as JSON
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url`; anything but a 200 with a JSON body is an error
    async fn get_json(&self, url: &str) -> Result<Value, NetError>;
}

/// Shared fetcher handle
pub type SharedFetcher = Arc<dyn JsonFetcher>;

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, NetError> {
        Ok(Self::with_client(create_client(config)?))
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn shared(self) -> SharedFetcher {
        Arc::new(self)
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, NetError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(NetError::from_transport)?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(NetError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| NetError::Decode(e.to_string()))
    }
}
