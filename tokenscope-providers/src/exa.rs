//! Exa search backend
//!
//! Uses Exa's neural search restricted to social hosts. Exa reports no
//! engagement counters, so mentions from here carry author information only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tokenscope_core::{handle_from_url, RawMention};
use tokenscope_net::{create_client, HttpConfig};

use crate::{MentionSearch, SearchError, SearchRequest, SharedSearch};

pub const EXA_API_BASE: &str = "https://api.exa.ai";

/// Earliest publication date searched by default
pub const DEFAULT_START_PUBLISHED_DATE: &str = "2023-01-01";

/// Values shipped in sample configs that are not real keys
const PLACEHOLDER_KEYS: &[&str] = &["your_exa_api_key_here"];

/// Configuration for the Exa backend
#[derive(Debug, Clone)]
pub struct ExaConfig {
    /// API key; the backend is unavailable without one
    pub api_key: Option<String>,
    pub base_url: String,
    pub http: HttpConfig,
}

impl Default for ExaConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("EXA_API_KEY").ok(),
            base_url: EXA_API_BASE.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl ExaConfig {
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Usable API key, if any
    pub fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !PLACEHOLDER_KEYS.contains(key))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchBody<'a> {
    query: &'a str,
    num_results: usize,
    #[serde(skip_serializing_if = "no_domains")]
    include_domains: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    start_published_date: Option<&'a str>,
    contents: ExaContents,
}

fn no_domains(domains: &&[String]) -> bool {
    domains.is_empty()
}

#[derive(Debug, Serialize)]
struct ExaContents {
    text: bool,
}

#[derive(Debug, Deserialize)]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExaResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl ExaResult {
    fn into_mention(self) -> RawMention {
        let mut mention = RawMention::new(
            self.title.as_deref().unwrap_or_default(),
            self.text.as_deref().unwrap_or_default(),
            &self.url,
        );

        let author = self
            .author
            .filter(|a| !a.trim().is_empty())
            .or_else(|| handle_from_url(&self.url));
        if let Some(author) = author {
            mention = mention.with_author(&author);
        }

        if let Some(published) = self
            .published_date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        {
            mention = mention.with_published_at(published.with_timezone(&Utc));
        }

        mention
    }
}

/// Exa-backed [`MentionSearch`]
pub struct ExaSearch {
    config: ExaConfig,
    api_key: String,
    client: Client,
}

impl ExaSearch {
    /// Fails with [`SearchError::MissingCredential`] when no usable key is set
    pub fn new(config: ExaConfig) -> Result<Self, SearchError> {
        let api_key = config
            .usable_key()
            .ok_or(SearchError::MissingCredential)?
            .to_string();
        let client = create_client(&config.http)?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    pub fn shared(self) -> SharedSearch {
        std::sync::Arc::new(self)
    }
}

#[async_trait]
impl MentionSearch for ExaSearch {
    fn name(&self) -> &str {
        "Exa"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawMention>, SearchError> {
        let body = ExaSearchBody {
            query: &request.query,
            num_results: request.num_results,
            include_domains: &request.include_domains,
            start_published_date: request.start_published_date.as_deref(),
            contents: ExaContents { text: true },
        };

        let response = self
            .client
            .post(format!("{}/search", self.config.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status().as_u16()));
        }

        let data: ExaSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        debug!("Exa returned {} results for {}", data.results.len(), request.query);

        Ok(data
            .results
            .into_iter()
            .map(ExaResult::into_mention)
            .collect())
    }
}
