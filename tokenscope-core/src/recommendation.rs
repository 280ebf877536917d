//! Multi-factor recommendation scoring
//!
//! Four additive components, evaluated in a fixed order that is also the
//! order of the reasons shown to the user:
//!
//! | component | weights            |
//! |-----------|--------------------|
//! | social    | 40 / 25 / 10 / 0   |
//! | notable   | 20 / 10 / 0        |
//! | liquidity | 20 / 10 / 0        |
//! | volume    | 20 / 10 / 0        |

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::engagement::round1;
use crate::{EngagementSummary, MarketSnapshot, MarketValue, TokenMetadata};

const STRONG_MARKET_USD: f64 = 100_000.0;
const MODERATE_MARKET_USD: f64 = 25_000.0;

/// Final verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationLabel {
    StrongAvoid,
    Avoid,
    Caution,
    ModerateBuy,
    StrongBuy,
}

impl fmt::Display for RecommendationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecommendationLabel::StrongAvoid => "STRONG AVOID",
            RecommendationLabel::Avoid => "AVOID",
            RecommendationLabel::Caution => "CAUTION",
            RecommendationLabel::ModerateBuy => "MODERATE BUY",
            RecommendationLabel::StrongBuy => "STRONG BUY",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
    ExtremelyHigh,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
            RiskLevel::ExtremelyHigh => "Extremely High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How a reason bears on the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonTone {
    Positive,
    Caution,
    Negative,
}

/// One line of the score breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reason {
    pub tone: ReasonTone,
    pub message: String,
}

impl Reason {
    fn new(tone: ReasonTone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.tone {
            ReasonTone::Positive => "+",
            ReasonTone::Caution => "~",
            ReasonTone::Negative => "-",
        };
        write!(f, "[{}] {}", marker, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub label: RecommendationLabel,
    /// 0-100, one decimal
    pub score: f64,
    pub risk_level: RiskLevel,
    /// Social, notable accounts, liquidity, volume, in that order
    pub reasons: Vec<Reason>,
    pub confidence: Confidence,
}

/// Format a dollar amount with thousands separators and no decimals
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn social_component(engagement: &EngagementSummary) -> (f64, Reason) {
    let count = engagement.total_mentions;
    if count == 0 {
        return (
            0.0,
            Reason::new(ReasonTone::Negative, "No verified social media mentions found"),
        );
    }

    let (points, tone, strength) = if engagement.engagement_score >= 70.0 {
        (40.0, ReasonTone::Positive, "Strong")
    } else if engagement.engagement_score >= 40.0 {
        (25.0, ReasonTone::Caution, "Moderate")
    } else {
        (10.0, ReasonTone::Negative, "Weak")
    };

    (
        points,
        Reason::new(
            tone,
            format!("{} social presence ({} verified mentions)", strength, count),
        ),
    )
}

fn notable_component(engagement: &EngagementSummary) -> (f64, Reason) {
    let count = engagement.notable_accounts.len();
    if count >= 3 {
        (
            20.0,
            Reason::new(ReasonTone::Positive, format!("{} notable accounts discussing", count)),
        )
    } else if count >= 1 {
        (
            10.0,
            Reason::new(ReasonTone::Caution, format!("{} notable account(s) discussing", count)),
        )
    } else {
        (0.0, Reason::new(ReasonTone::Negative, "No notable accounts discussing"))
    }
}

/// Tiered market component; `describe` renders the tier word and amount
fn market_component(
    value: MarketValue,
    unknown: &str,
    describe: impl Fn(&str, &str) -> String,
    tiers: [&str; 3],
) -> (f64, Reason) {
    let Some(amount) = value.known() else {
        return (0.0, Reason::new(ReasonTone::Negative, unknown));
    };

    let formatted = format_usd(amount);
    if amount >= STRONG_MARKET_USD {
        (20.0, Reason::new(ReasonTone::Positive, describe(tiers[0], &formatted)))
    } else if amount >= MODERATE_MARKET_USD {
        (10.0, Reason::new(ReasonTone::Caution, describe(tiers[1], &formatted)))
    } else {
        (0.0, Reason::new(ReasonTone::Negative, describe(tiers[2], &formatted)))
    }
}

fn verdict(score: f64) -> (RecommendationLabel, RiskLevel) {
    if score >= 85.0 {
        (RecommendationLabel::StrongBuy, RiskLevel::Low)
    } else if score >= 65.0 {
        (RecommendationLabel::ModerateBuy, RiskLevel::Medium)
    } else if score >= 45.0 {
        (RecommendationLabel::Caution, RiskLevel::High)
    } else if score >= 25.0 {
        (RecommendationLabel::Avoid, RiskLevel::VeryHigh)
    } else {
        (RecommendationLabel::StrongAvoid, RiskLevel::ExtremelyHigh)
    }
}

fn confidence(score: f64) -> Confidence {
    if score >= 65.0 {
        Confidence::High
    } else if score >= 45.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Combine social and market signals into a single verdict
///
/// Metadata does not move the score; market figures that are not
/// [`MarketValue::Known`] count as unknown whatever the reason.
pub fn score_recommendation(
    metadata: &TokenMetadata,
    market: &MarketSnapshot,
    engagement: &EngagementSummary,
) -> Recommendation {
    debug!(
        "Scoring {} (metadata from {}, market from {})",
        metadata.name, metadata.source, market.source
    );

    let components = [
        social_component(engagement),
        notable_component(engagement),
        market_component(
            market.liquidity_usd,
            "Unknown liquidity data",
            |tier, amount| format!("{} liquidity ({})", tier, amount),
            ["Strong", "Moderate", "Low"],
        ),
        market_component(
            market.volume_24h_usd,
            "Unknown volume data",
            |tier, amount| format!("{} trading volume ({}/24h)", tier, amount),
            ["High", "Moderate", "Low"],
        ),
    ];

    let mut score = 0.0;
    let mut reasons = Vec::with_capacity(components.len());
    for (points, reason) in components {
        score += points;
        reasons.push(reason);
    }

    let score = round1(score.clamp(0.0, 100.0));
    let (label, risk_level) = verdict(score);

    Recommendation {
        label,
        score,
        risk_level,
        reasons,
        confidence: confidence(score),
    }
}
