//! Analysis report

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use tokenscope_core::{
    EngagementSummary, MarketSnapshot, RankedMention, Recommendation, TokenAddress, TokenMetadata,
};

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub address: TokenAddress,
    pub metadata: TokenMetadata,
    pub market: MarketSnapshot,
    /// Queries actually sent to the search backend
    pub queries: Vec<String>,
    pub search_enabled: bool,
    /// Verified mentions, most relevant first
    pub mentions: Vec<RankedMention>,
    pub engagement: EngagementSummary,
    pub recommendation: Recommendation,
}

impl AnalysisReport {
    /// True if neither metadata nor market data came from a real provider
    pub fn fully_degraded(&self) -> bool {
        self.metadata.fallback && self.market.fallback
    }
}
