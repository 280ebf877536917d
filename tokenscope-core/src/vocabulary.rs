//! Domain vocabulary for query synthesis and scoring
//!
//! Keyword lists are data, not code: the scoring engine only sees a
//! [`Vocabulary`], loaded from TOML. The default document is embedded in the
//! binary; operators can replace it with their own file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const DEFAULT_VOCABULARY: &str = include_str!("../vocabulary/default.toml");

/// Errors loading a vocabulary file
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse vocabulary: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Category -> term lists used across the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub scope: ScopeTerms,
    #[serde(default)]
    pub context: ContextTerms,
    #[serde(default)]
    pub notable: NotableTerms,
    #[serde(default)]
    pub ranking: RankingTerms,
    #[serde(default)]
    pub sentiment: SentimentTerms,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTerms {
    /// Target hosts; the first scopes `site:` queries
    #[serde(default)]
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextTerms {
    #[serde(default)]
    pub identifier_terms: Vec<String>,
    #[serde(default)]
    pub ticker_terms: Vec<String>,
    #[serde(default)]
    pub platform_terms: Vec<String>,
    #[serde(default)]
    pub qualifier_terms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotableTerms {
    #[serde(default)]
    pub handle_fragments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingTerms {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentTerms {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

impl Vocabulary {
    /// The vocabulary compiled into the binary
    pub fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_VOCABULARY).expect("embedded vocabulary must parse")
    }

    /// Parse a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = toml::from_str(toml_str)?;
        Ok(vocabulary.normalized())
    }

    /// Load a TOML document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Domain used for `site:` scoping
    pub fn primary_domain(&self) -> Option<&str> {
        self.scope.domains.first().map(String::as_str)
    }

    /// True if `text` (already lowercase) contains any of `terms`
    pub fn contains_any(text: &str, terms: &[String]) -> bool {
        terms.iter().any(|term| text.contains(term.as_str()))
    }

    // Matching runs against case-folded text
    fn normalized(mut self) -> Self {
        let lists = [
            &mut self.scope.domains,
            &mut self.context.identifier_terms,
            &mut self.context.ticker_terms,
            &mut self.context.platform_terms,
            &mut self.context.qualifier_terms,
            &mut self.notable.handle_fragments,
            &mut self.ranking.keywords,
            &mut self.sentiment.positive,
            &mut self.sentiment.negative,
        ];
        for list in lists {
            list.retain(|term| !term.trim().is_empty());
            for term in list.iter_mut() {
                *term = term.trim().to_lowercase();
            }
        }
        self
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::embedded()
    }
}
