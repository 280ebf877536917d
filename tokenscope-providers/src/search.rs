//! Mention search adapter interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use tokenscope_core::RawMention;
use tokenscope_net::NetError;

/// Results requested per query unless configured otherwise
pub const DEFAULT_RESULTS_PER_QUERY: usize = 10;

/// Errors from a search backend
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search credential not configured")]
    MissingCredential,

    #[error("Search client error: {0}")]
    Client(#[from] NetError),

    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search returned status {0}")]
    Status(u16),

    #[error("Failed to parse search response: {0}")]
    Parse(String),
}

/// One search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Hosts results are restricted to; empty means unrestricted
    pub include_domains: Vec<String>,
    pub num_results: usize,
    /// Earliest publication date, `YYYY-MM-DD`
    pub start_published_date: Option<String>,
}

impl SearchRequest {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            include_domains: Vec::new(),
            num_results: DEFAULT_RESULTS_PER_QUERY,
            start_published_date: None,
        }
    }

    pub fn with_domains(mut self, domains: &[String]) -> Self {
        self.include_domains = domains.to_vec();
        self
    }

    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    pub fn with_start_published_date(mut self, date: Option<&str>) -> Self {
        self.start_published_date = date.map(str::to_string);
        self
    }
}

/// Backend that finds candidate mentions for a query
#[async_trait]
pub trait MentionSearch: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Run one query; an empty result set is not an error
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawMention>, SearchError>;
}

/// Shared search backend handle
pub type SharedSearch = Arc<dyn MentionSearch>;
