//! Engagement aggregation over verified mentions
//!
//! The score is the sum of three bounded parts:
//! - breadth: 15 per mention, at most 60
//! - depth: (likes + 2 * reposts) / 10, at most 30
//! - authority: 10 per distinct notable account
//!
//! capped at 100 overall.

use serde::Serialize;
use std::fmt;

use crate::{Engagement, VerifiedMention, Vocabulary};

/// Likes a post needs before its author can count as notable
pub const NOTABLE_MIN_LIKES: u64 = 100;

const BREADTH_PER_MENTION: f64 = 15.0;
const BREADTH_CAP: f64 = 60.0;
const DEPTH_DIVISOR: f64 = 10.0;
const DEPTH_CAP: f64 = 30.0;
const AUTHORITY_PER_ACCOUNT: f64 = 10.0;
const SCORE_CAP: f64 = 100.0;

/// Qualitative engagement bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    None,
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl EngagementLevel {
    /// Band and risk label for a score
    fn from_score(score: f64) -> (Self, &'static str) {
        if score >= 80.0 {
            (EngagementLevel::VeryHigh, "Low - Strong Community")
        } else if score >= 60.0 {
            (EngagementLevel::High, "Medium - Good Community")
        } else if score >= 30.0 {
            (EngagementLevel::Moderate, "High - Limited Community")
        } else if score >= 10.0 {
            (EngagementLevel::Low, "Very High - Minimal Interest")
        } else {
            (EngagementLevel::VeryLow, "Extremely High - No Community")
        }
    }
}

impl fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EngagementLevel::None => "None",
            EngagementLevel::VeryLow => "Very Low",
            EngagementLevel::Low => "Low",
            EngagementLevel::Moderate => "Moderate",
            EngagementLevel::High => "High",
            EngagementLevel::VeryHigh => "Very High",
        };
        f.write_str(label)
    }
}

/// Reduced social signal for one token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementSummary {
    /// 0-100, one decimal
    pub engagement_score: f64,
    /// Distinct notable handles, lowercase, first-seen order
    pub notable_accounts: Vec<String>,
    pub total_mentions: usize,
    pub engagement_level: EngagementLevel,
    pub risk_assessment: String,
    pub total_engagement: Engagement,
    pub positive_indicators: usize,
    pub negative_indicators: usize,
}

impl EngagementSummary {
    /// Summary for a token nobody is talking about
    pub fn empty() -> Self {
        Self {
            engagement_score: 0.0,
            notable_accounts: Vec::new(),
            total_mentions: 0,
            engagement_level: EngagementLevel::None,
            risk_assessment: "Very High - No Social Media Presence".to_string(),
            total_engagement: Engagement::default(),
            positive_indicators: 0,
            negative_indicators: 0,
        }
    }
}

impl Default for EngagementSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduce verified mentions to an engagement summary
pub fn aggregate_engagement(
    verified: &[VerifiedMention],
    vocabulary: &Vocabulary,
) -> EngagementSummary {
    if verified.is_empty() {
        return EngagementSummary::empty();
    }

    let fragments = &vocabulary.notable.handle_fragments;
    let mut total = Engagement::default();
    let mut notable_accounts: Vec<String> = Vec::new();
    let mut positive = 0;
    let mut negative = 0;

    for entry in verified {
        let mention = &entry.mention;
        let engagement = mention.engagement_or_default();
        total += engagement;

        if let Some(handle) = mention.author_handle() {
            let handle = handle.to_lowercase();
            let keyword_match = fragments.iter().any(|f| handle.contains(f.as_str()));
            if keyword_match
                && engagement.likes > NOTABLE_MIN_LIKES
                && !notable_accounts.contains(&handle)
            {
                notable_accounts.push(handle);
            }
        }

        let text = mention.scored_text();
        if Vocabulary::contains_any(&text, &vocabulary.sentiment.positive) {
            positive += 1;
        } else if Vocabulary::contains_any(&text, &vocabulary.sentiment.negative) {
            negative += 1;
        }
    }

    let breadth = (verified.len() as f64 * BREADTH_PER_MENTION).min(BREADTH_CAP);
    let depth = ((total.likes as f64 + 2.0 * total.reposts as f64) / DEPTH_DIVISOR).min(DEPTH_CAP);
    let authority = notable_accounts.len() as f64 * AUTHORITY_PER_ACCOUNT;
    let score = round1((breadth + depth + authority).min(SCORE_CAP));

    let (engagement_level, risk) = EngagementLevel::from_score(score);

    EngagementSummary {
        engagement_score: score,
        notable_accounts,
        total_mentions: verified.len(),
        engagement_level,
        risk_assessment: risk.to_string(),
        total_engagement: total,
        positive_indicators: positive,
        negative_indicators: negative,
    }
}
