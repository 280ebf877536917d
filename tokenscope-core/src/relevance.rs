//! Relevance verification and ranking of candidate mentions
//!
//! Two independent judgments live here:
//!
//! - **Verification** is a pass/fail gate. Each signal adds a fixed weight and
//!   only candidates reaching [`VERIFICATION_THRESHOLD`] become evidence. A
//!   bare keyword hit without address or host corroboration cannot pass.
//! - **Ranking** orders already accepted mentions for display, weighting exact
//!   address matches far above everything else.
//!
//! The two use different weights.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::{host_matches, RawMention, TokenAddress, VerifiedMention, Vocabulary};

/// Minimum accumulated score for a mention to count as evidence
pub const VERIFICATION_THRESHOLD: u32 = 70;

/// Width of the address windows looked for in mention text
pub const ADDRESS_WINDOW: usize = 8;

/// Distance between consecutive address windows
pub const ADDRESS_STRIDE: usize = 4;

const ADDRESS_WEIGHT: u32 = 50;
const SYMBOL_WEIGHT: u32 = 30;
const CONTEXT_WEIGHT: u32 = 20;
const HOST_WEIGHT: u32 = 20;
const METADATA_WEIGHT: u32 = 10;

/// Prefix lengths and bonuses for ranking partial address matches
const RANK_PREFIXES: [(usize, u32); 3] = [(12, 50), (8, 30), (6, 20)];
const RANK_FULL_ADDRESS: u32 = 100;
const RANK_SYMBOL: u32 = 20;
const RANK_NAME: u32 = 15;
const RANK_KEYWORD: u32 = 1;

/// What a mention is checked against
#[derive(Debug, Clone, Copy)]
pub struct TokenIdentity<'a> {
    pub address: &'a TokenAddress,
    pub symbol: Option<&'a str>,
    pub name: Option<&'a str>,
}

impl<'a> TokenIdentity<'a> {
    pub fn new(address: &'a TokenAddress) -> Self {
        Self {
            address,
            symbol: None,
            name: None,
        }
    }

    pub fn with_symbol(mut self, symbol: Option<&'a str>) -> Self {
        self.symbol = symbol.map(|s| s.trim_start_matches('$')).filter(|s| !s.is_empty());
        self
    }

    pub fn with_name(mut self, name: Option<&'a str>) -> Self {
        self.name = name.filter(|n| !n.trim().is_empty());
        self
    }
}

/// URL key used for deduplication
///
/// Scheme and host are case-insensitive; path and query are compared as-is.
fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (host, tail) = rest.split_at(host_end);
    format!("{}://{}{}", scheme.to_lowercase(), host.to_lowercase(), tail)
}

/// Drop mentions whose URL was already seen, keeping first occurrences in order
pub fn dedupe_by_url(candidates: Vec<RawMention>) -> Vec<RawMention> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|mention| seen.insert(normalize_url(&mention.url)))
        .collect()
}

/// Address windows sampled at a fixed stride, lowercased
fn address_windows(address: &TokenAddress) -> Vec<String> {
    let lower = address.as_str().to_lowercase();
    if lower.len() < ADDRESS_WINDOW {
        return vec![lower];
    }
    (0..=lower.len() - ADDRESS_WINDOW)
        .step_by(ADDRESS_STRIDE)
        .map(|start| lower[start..start + ADDRESS_WINDOW].to_string())
        .collect()
}

/// Verification score of a single candidate
///
/// Pure: the same candidate and identity always produce the same score.
pub fn verification_score(
    mention: &RawMention,
    identity: &TokenIdentity<'_>,
    vocabulary: &Vocabulary,
) -> u32 {
    let content = mention.scored_text();
    let mut score = 0;

    if address_windows(identity.address)
        .iter()
        .any(|window| content.contains(window.as_str()))
    {
        score += ADDRESS_WEIGHT;
    }

    if let Some(symbol) = identity.symbol {
        let symbol = symbol.to_lowercase();
        if content.contains(&symbol) || content.contains(&format!("${}", symbol)) {
            score += SYMBOL_WEIGHT;
        }
    }

    let context = &vocabulary.context;
    if Vocabulary::contains_any(&content, &context.platform_terms)
        && Vocabulary::contains_any(&content, &context.qualifier_terms)
    {
        score += CONTEXT_WEIGHT;
    }

    if let Some(host) = mention.host() {
        if vocabulary
            .scope
            .domains
            .iter()
            .any(|domain| host_matches(&host, domain))
        {
            score += HOST_WEIGHT;
        }
    }

    if mention.carries_metadata() {
        score += METADATA_WEIGHT;
    }

    score
}

/// Deduplicate candidates and keep those reaching the verification threshold
pub fn verify_mentions(
    candidates: Vec<RawMention>,
    identity: &TokenIdentity<'_>,
    vocabulary: &Vocabulary,
) -> Vec<VerifiedMention> {
    dedupe_by_url(candidates)
        .into_iter()
        .filter_map(|mention| {
            let score = verification_score(&mention, identity, vocabulary);
            if score >= VERIFICATION_THRESHOLD {
                debug!("Verified mention {} (score: {})", mention.url, score);
                Some(VerifiedMention {
                    mention,
                    verification_score: score,
                })
            } else {
                debug!("Rejected mention {} (score: {})", mention.url, score);
                None
            }
        })
        .collect()
}

/// Display relevance of a mention
pub fn ranking_score(
    mention: &RawMention,
    identity: &TokenIdentity<'_>,
    vocabulary: &Vocabulary,
) -> u32 {
    let content = mention.scored_text();
    let address = identity.address.as_str().to_lowercase();
    let mut score = 0;

    if content.contains(&address) {
        score += RANK_FULL_ADDRESS;
    }

    for (len, bonus) in RANK_PREFIXES {
        if content.contains(&address[..len.min(address.len())]) {
            score += bonus;
        }
    }

    if let Some(symbol) = identity.symbol {
        if content.contains(&symbol.to_lowercase()) {
            score += RANK_SYMBOL;
        }
    }

    if let Some(name) = identity.name {
        if content.contains(&name.to_lowercase()) {
            score += RANK_NAME;
        }
    }

    let keyword_hits = vocabulary
        .ranking
        .keywords
        .iter()
        .filter(|keyword| content.contains(keyword.as_str()))
        .count() as u32;

    score + keyword_hits * RANK_KEYWORD
}

/// A verified mention with its display relevance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMention {
    #[serde(flatten)]
    pub verified: VerifiedMention,
    pub relevance: u32,
}

/// Order mentions by relevance, highest first, dropping zero scores
///
/// Ties keep their input order.
pub fn rank_mentions(
    mentions: Vec<VerifiedMention>,
    identity: &TokenIdentity<'_>,
    vocabulary: &Vocabulary,
) -> Vec<RankedMention> {
    let mut ranked: Vec<RankedMention> = mentions
        .into_iter()
        .map(|verified| {
            let relevance = ranking_score(&verified.mention, identity, vocabulary);
            RankedMention { verified, relevance }
        })
        .filter(|ranked| ranked.relevance > 0)
        .collect();

    ranked.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Engagement;

    const MINT: &str = "GBUxQFRXQjSPjkxymAUKPfbUbSpRY8Ui7az1HCxtpump";

    fn address() -> TokenAddress {
        TokenAddress::parse(MINT).unwrap()
    }

    fn mention(body: &str, url: &str) -> RawMention {
        RawMention::new("", body, url)
    }

    #[test]
    fn test_address_windows_cover_stride() {
        let windows = address_windows(&address());
        assert_eq!(windows.first().map(String::as_str), Some("gbuxqfrx"));
        // 44 chars, stride 4, width 8 -> starts 0,4,...,36
        assert_eq!(windows.len(), 10);
        assert_eq!(windows.last().map(String::as_str), Some("hcxtpump"));
    }

    #[test]
    fn test_full_evidence_scores_all_signals() {
        let addr = address();
        let identity = TokenIdentity::new(&addr).with_symbol(Some("PCAT"));
        let candidate = mention(
            "Just aped $PCAT on pump.fun CA: GBUxQFRXQjSP...",
            "https://x.com/solana_degen/status/1",
        )
        .with_author("@solana_degen")
        .with_engagement(Engagement::new(23, 5, 15));

        assert_eq!(
            verification_score(&candidate, &identity, &Vocabulary::embedded()),
            50 + 30 + 20 + 20 + 10
        );
    }

    #[test]
    fn test_partial_address_in_middle_matches() {
        let addr = address();
        let identity = TokenIdentity::new(&addr);
        // Characters 24..32 of the address, aligned to the stride
        let candidate = mention("ca ends ...bSpRY8Ui7a", "https://example.com/p");
        assert_eq!(verification_score(&candidate, &identity, &Vocabulary::embedded()), 50);
    }

    #[test]
    fn test_keyword_hits_need_corroboration() {
        let addr = address();
        let identity = TokenIdentity::new(&addr).with_symbol(Some("PCAT"));
        let vocabulary = Vocabulary::embedded();
        let body = "new gem on pump fun, $PCAT to the moon";

        let off_platform = mention(body, "https://blog.example.com/p").with_author("@a");
        let score = verification_score(&off_platform, &identity, &vocabulary);
        assert_eq!(score, 30 + 20 + 10);
        assert!(score < VERIFICATION_THRESHOLD);

        let on_platform = mention(body, "https://x.com/a/status/9").with_author("@a");
        let score = verification_score(&on_platform, &identity, &vocabulary);
        assert_eq!(score, 30 + 20 + 20 + 10);
        assert!(score >= VERIFICATION_THRESHOLD);

        let unrelated =
            mention("pump fun is wild today", "https://x.com/a/status/10").with_author("@a");
        let score = verification_score(&unrelated, &identity, &vocabulary);
        assert_eq!(score, 20 + 20 + 10);
        assert!(score < VERIFICATION_THRESHOLD);
    }

    #[test]
    fn test_unknown_symbol_adds_nothing() {
        let addr = address();
        let identity = TokenIdentity::new(&addr).with_symbol(None);
        let candidate = mention("pcat pcat pcat", "https://example.com");
        assert_eq!(verification_score(&candidate, &identity, &Vocabulary::embedded()), 0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let addr = address();
        let identity = TokenIdentity::new(&addr).with_symbol(Some("PCAT"));
        let vocabulary = Vocabulary::embedded();
        let candidate = mention("GBUxQFRX on solana via pump", "https://twitter.com/x/status/1");
        let first = verification_score(&candidate, &identity, &vocabulary);
        let second = verification_score(&candidate, &identity, &vocabulary);
        assert_eq!(first, second);
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let first = mention("first", "https://x.com/a/status/1");
        let dup = mention("second", "https://x.com/a/status/1");
        let other = mention("third", "https://x.com/b/status/2");
        let trailing = mention("fourth", "https://x.com/b/status/2/");

        let unique = dedupe_by_url(vec![first, dup, other, trailing]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].body, "first");
        assert_eq!(unique[1].body, "third");
    }

    #[test]
    fn test_dedupe_keeps_urls_differing_in_path_case() {
        let upper = mention("upper", "https://www.youtube.com/watch?v=AbC");
        let lower = mention("lower", "https://www.youtube.com/watch?v=abc");
        let same_host = mention("host", "HTTPS://WWW.YouTube.com/watch?v=AbC");

        let unique = dedupe_by_url(vec![upper, lower, same_host]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].body, "upper");
        assert_eq!(unique[1].body, "lower");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(" HTTPS://X.com/Ab/status/1/ "), "https://x.com/Ab/status/1");
        assert_eq!(normalize_url("https://X.COM?q=AbC"), "https://x.com?q=AbC");
        assert_eq!(normalize_url("not a url"), "not a url");
    }

    #[test]
    fn test_score_at_threshold_is_verified() {
        let addr = address();
        let identity = TokenIdentity::new(&addr);
        let vocabulary = Vocabulary::embedded();
        let candidate = mention("GBUxQFRX", "https://x.com/a/status/3");

        assert_eq!(verification_score(&candidate, &identity, &vocabulary), VERIFICATION_THRESHOLD);

        let verified = verify_mentions(vec![candidate], &identity, &vocabulary);
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].verification_score, 70);
    }

    #[test]
    fn test_verify_filters_and_attaches_score() {
        let addr = address();
        let identity = TokenIdentity::new(&addr).with_symbol(Some("PCAT"));
        let strong = mention("GBUxQFRXQjSP launched", "https://x.com/a/status/1").with_author("@a");
        let weak = mention("solana summer", "https://x.com/b/status/2");
        let duplicate = mention("GBUxQFRXQjSP again", "https://x.com/a/status/1");

        let verified =
            verify_mentions(vec![strong, weak, duplicate], &identity, &Vocabulary::embedded());
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].mention.body, "GBUxQFRXQjSP launched");
        assert_eq!(verified[0].verification_score, 80);
    }

    #[test]
    fn test_ranking_weights() {
        let addr = address();
        let vocabulary = Vocabulary::embedded();
        let identity = TokenIdentity::new(&addr)
            .with_symbol(Some("PCAT"))
            .with_name(Some("Pump Cat"));

        let full = mention(MINT, "https://x.com/a/status/1");
        assert_eq!(ranking_score(&full, &identity, &vocabulary), 100 + 50 + 30 + 20 + 1);

        let prefix8 = mention("GBUxQFRX", "https://x.com/a/status/2");
        assert_eq!(ranking_score(&prefix8, &identity, &vocabulary), 30 + 20);

        let named = mention("Pump Cat (PCAT)", "https://x.com/a/status/3");
        assert_eq!(ranking_score(&named, &identity, &vocabulary), 20 + 15 + 1);
    }

    #[test]
    fn test_rank_orders_and_drops_zero() {
        let addr = address();
        let vocabulary = Vocabulary::from_toml_str("").unwrap();
        let identity = TokenIdentity::new(&addr);

        let verified = |body: &str, url: &str| VerifiedMention {
            mention: mention(body, url),
            verification_score: 70,
        };

        let ranked = rank_mentions(
            vec![
                verified("nothing here", "https://x.com/a/status/1"),
                verified("GBUxQF", "https://x.com/a/status/2"),
                verified(MINT, "https://x.com/a/status/3"),
            ],
            &identity,
            &vocabulary,
        );

        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].verified.mention.url.ends_with("/3"));
        assert_eq!(ranked[1].relevance, 20);
    }
}
