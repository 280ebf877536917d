//! Token metadata and market snapshot entities
//!
//! Both are produced once per run by a resolver and never mutated afterwards.
//! Missing provider values are modelled explicitly (`Option`, [`MarketValue`])
//! and only turned into display strings at the presentation boundary.

use serde::Serialize;
use std::fmt;

use crate::TokenAddress;

/// Source label used when every provider failed
pub const FALLBACK_SOURCE: &str = "Fallback";

/// Decimals assumed when a provider does not report them
pub const DEFAULT_DECIMALS: u8 = 9;

/// Characters of the address shown in placeholder names
pub const PLACEHOLDER_PREFIX_LEN: usize = 8;

/// Symbol/name strings providers use to mean "not known"
const SENTINELS: &[&str] = &["unknown", "unknown token", "n/a", "none"];

/// True if a provider string carries no information
pub fn is_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || SENTINELS.iter().any(|s| trimmed.eq_ignore_ascii_case(s))
}

/// Deterministic display name derived from the address alone
pub fn placeholder_name(address: &TokenAddress) -> String {
    format!("Token {}...", address.prefix(PLACEHOLDER_PREFIX_LEN))
}

/// Why a resolver ended up on its fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackCause {
    /// No provider answered with a usable response
    Unreachable,
    /// At least one provider answered but had nothing for this token
    NoData,
}

/// Descriptive token metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: Option<String>,
    pub decimals: u8,
    pub supply: Option<String>,
    pub success: bool,
    pub source: String,
    pub fallback: bool,
    /// Name was synthesized from the address
    #[serde(skip)]
    placeholder: bool,
}

impl TokenMetadata {
    /// Metadata parsed from a provider
    pub fn resolved(
        source: &str,
        name: Option<String>,
        symbol: Option<String>,
        decimals: Option<u8>,
        supply: Option<String>,
        address: &TokenAddress,
    ) -> Self {
        let symbol = symbol.filter(|s| !is_sentinel(s));
        let name = name.filter(|n| !is_sentinel(n)).or_else(|| symbol.clone());
        let placeholder = name.is_none();

        Self {
            name: name.unwrap_or_else(|| placeholder_name(address)),
            symbol,
            decimals: decimals.unwrap_or(DEFAULT_DECIMALS),
            supply: supply.filter(|s| !is_sentinel(s)),
            success: true,
            source: source.to_string(),
            fallback: false,
            placeholder,
        }
    }

    /// Placeholder built from the address when every provider failed
    pub fn fallback(address: &TokenAddress) -> Self {
        Self {
            name: placeholder_name(address),
            symbol: None,
            decimals: DEFAULT_DECIMALS,
            supply: None,
            success: false,
            source: FALLBACK_SOURCE.to_string(),
            fallback: true,
            placeholder: true,
        }
    }

    /// Symbol worth putting into a search query
    pub fn searchable_symbol(&self) -> Option<&str> {
        self.symbol.as_deref().filter(|s| !is_sentinel(s))
    }

    /// Name worth putting into a search query
    ///
    /// Placeholder names derived from the address are never searchable.
    pub fn searchable_name(&self) -> Option<&str> {
        if self.placeholder {
            return None;
        }
        Some(self.name.as_str()).filter(|n| !is_sentinel(n))
    }
}

/// A market figure as reported by a provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum MarketValue {
    Known(f64),
    /// Provider confirmed the token has no trading pairs
    NotTrading,
    Unknown,
}

impl MarketValue {
    pub fn known(&self) -> Option<f64> {
        match self {
            MarketValue::Known(v) => Some(*v),
            _ => None,
        }
    }

    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(MarketValue::Unknown, MarketValue::Known)
    }
}

impl fmt::Display for MarketValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketValue::Known(v) => write!(f, "{}", v),
            MarketValue::NotTrading => f.write_str("No trading data"),
            MarketValue::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Market metrics for a token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub price_usd: MarketValue,
    pub market_cap: MarketValue,
    pub liquidity_usd: MarketValue,
    pub volume_24h_usd: MarketValue,
    pub price_change_24h_pct: MarketValue,
    pub dex: Option<String>,
    pub success: bool,
    pub source: String,
    pub fallback: bool,
}

impl MarketSnapshot {
    /// Snapshot with every figure unknown, ready to be filled by a parser
    pub fn resolved(source: &str) -> Self {
        Self {
            price_usd: MarketValue::Unknown,
            market_cap: MarketValue::Unknown,
            liquidity_usd: MarketValue::Unknown,
            volume_24h_usd: MarketValue::Unknown,
            price_change_24h_pct: MarketValue::Unknown,
            dex: None,
            success: true,
            source: source.to_string(),
            fallback: false,
        }
    }

    /// Fallback when every market provider failed
    ///
    /// A token that answered without trading pairs has zero price, volume and
    /// change; its market cap and liquidity are reported as not trading.
    pub fn fallback(cause: FallbackCause) -> Self {
        let (flow, depth) = match cause {
            FallbackCause::Unreachable => (MarketValue::Unknown, MarketValue::Unknown),
            FallbackCause::NoData => (MarketValue::Known(0.0), MarketValue::NotTrading),
        };

        Self {
            price_usd: flow,
            market_cap: depth,
            liquidity_usd: depth,
            volume_24h_usd: flow,
            price_change_24h_pct: flow,
            dex: None,
            success: false,
            source: FALLBACK_SOURCE.to_string(),
            fallback: true,
        }
    }
}
