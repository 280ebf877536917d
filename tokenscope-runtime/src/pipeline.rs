//! Analysis pipeline
//!
//! One run takes a single token address through every stage:
//!
//! 1. validate the address; nothing touches the network before this passes
//! 2. resolve metadata and market data concurrently
//! 3. synthesize queries and search them one at a time, pausing between calls
//! 4. verify, aggregate and rank the mentions
//! 5. score the recommendation
//!
//! Only an invalid address is an error. Provider and search failures degrade
//! into fallback values and empty result sets.

use chrono::Utc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tokenscope_core::{
    aggregate_engagement, rank_mentions, score_recommendation, synthesize_queries, verify_mentions,
    AddressError, MarketSnapshot, RawMention, TokenAddress, TokenIdentity, TokenMetadata,
    Vocabulary, MAX_RANKED_MENTIONS,
};
use tokenscope_net::SharedFetcher;
use tokenscope_providers::{
    market_providers, metadata_providers, resolve, Provider, SearchRequest, SharedSearch,
    DEFAULT_RESULTS_PER_QUERY, DEFAULT_START_PUBLISHED_DATE,
};

use crate::AnalysisReport;

/// Queries issued per run unless configured otherwise
pub const DEFAULT_MAX_QUERIES: usize = 5;

/// Pause between consecutive search calls
pub const DEFAULT_QUERY_DELAY_MS: u64 = 500;

/// Errors that stop a run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid token address: {0}")]
    InvalidAddress(#[from] AddressError),
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub vocabulary: Vocabulary,
    /// Head of the query list that is actually searched
    pub max_queries: usize,
    pub results_per_query: usize,
    pub query_delay: Duration,
    pub start_published_date: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            max_queries: DEFAULT_MAX_QUERIES,
            results_per_query: DEFAULT_RESULTS_PER_QUERY,
            query_delay: Duration::from_millis(DEFAULT_QUERY_DELAY_MS),
            start_published_date: Some(DEFAULT_START_PUBLISHED_DATE.to_string()),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_max_queries(mut self, max_queries: usize) -> Self {
        self.max_queries = max_queries;
        self
    }

    pub fn with_results_per_query(mut self, results_per_query: usize) -> Self {
        self.results_per_query = results_per_query;
        self
    }

    pub fn with_query_delay(mut self, query_delay: Duration) -> Self {
        self.query_delay = query_delay;
        self
    }
}

/// Runs analyses; holds no state between runs
pub struct Analyzer {
    config: AnalyzerConfig,
    fetcher: SharedFetcher,
    search: Option<SharedSearch>,
    metadata_providers: Vec<Provider<TokenMetadata>>,
    market_providers: Vec<Provider<MarketSnapshot>>,
}

impl Analyzer {
    /// Analyzer over the default provider tables
    ///
    /// Without a search backend the social stages see no mentions.
    pub fn new(
        config: AnalyzerConfig,
        fetcher: SharedFetcher,
        search: Option<SharedSearch>,
    ) -> Self {
        Self {
            config,
            fetcher,
            search,
            metadata_providers: metadata_providers(),
            market_providers: market_providers(),
        }
    }

    pub fn with_metadata_providers(mut self, providers: Vec<Provider<TokenMetadata>>) -> Self {
        self.metadata_providers = providers;
        self
    }

    pub fn with_market_providers(mut self, providers: Vec<Provider<MarketSnapshot>>) -> Self {
        self.market_providers = providers;
        self
    }

    pub fn search_enabled(&self) -> bool {
        self.search.is_some()
    }

    /// Analyze one token address
    pub async fn analyze(&self, input: &str) -> Result<AnalysisReport, AnalysisError> {
        let address = TokenAddress::parse(input.trim())?;
        Ok(self.run(address).await)
    }

    async fn run(&self, address: TokenAddress) -> AnalysisReport {
        let run_id = Uuid::new_v4();
        info!("Analyzing {} (run {})", address, run_id);

        let fetcher = self.fetcher.as_ref();
        let (metadata, market) = futures::join!(
            resolve(fetcher, &self.metadata_providers, &address),
            resolve(fetcher, &self.market_providers, &address),
        );
        info!(
            "Token identified as {} via {}, market data via {}",
            metadata.name, metadata.source, market.source
        );

        let vocabulary = &self.config.vocabulary;
        let queries: Vec<String> = if self.search.is_some() {
            synthesize_queries(&address, &metadata, vocabulary)
                .into_iter()
                .take(self.config.max_queries)
                .collect()
        } else {
            info!("No search backend configured, skipping social analysis");
            Vec::new()
        };

        let candidates = self.collect_mentions(&queries).await;

        let identity = TokenIdentity::new(&address)
            .with_symbol(metadata.searchable_symbol())
            .with_name(metadata.searchable_name());
        let verified = verify_mentions(candidates, &identity, vocabulary);
        info!("{} mentions verified", verified.len());

        let engagement = aggregate_engagement(&verified, vocabulary);
        let mut mentions = rank_mentions(verified, &identity, vocabulary);
        mentions.truncate(MAX_RANKED_MENTIONS);

        let recommendation = score_recommendation(&metadata, &market, &engagement);
        info!(
            "Recommendation: {} (score {}, risk {})",
            recommendation.label, recommendation.score, recommendation.risk_level
        );

        AnalysisReport {
            run_id,
            analyzed_at: Utc::now(),
            address,
            metadata,
            market,
            search_enabled: self.search.is_some(),
            queries,
            mentions,
            engagement,
            recommendation,
        }
    }

    /// Run queries in order, pausing between them; failed queries are skipped
    async fn collect_mentions(&self, queries: &[String]) -> Vec<RawMention> {
        let Some(search) = &self.search else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for (i, query) in queries.iter().enumerate() {
            if i > 0 && !self.config.query_delay.is_zero() {
                tokio::time::sleep(self.config.query_delay).await;
            }

            let request = SearchRequest::new(query)
                .with_domains(&self.config.vocabulary.scope.domains)
                .with_num_results(self.config.results_per_query)
                .with_start_published_date(self.config.start_published_date.as_deref());

            debug!("Searching {}: {}", search.name(), query);
            match search.search(&request).await {
                Ok(results) => {
                    debug!("Query returned {} candidates", results.len());
                    candidates.extend(results);
                }
                Err(e) => warn!("Search for {} failed: {}", query, e),
            }
        }

        candidates
    }
}
