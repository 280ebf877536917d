//! Search query synthesis
//!
//! Builds the ordered list of queries sent to the mention search backend.
//! Order runs from most to least specific, so callers that cap the number
//! of queries must take from the head:
//!
//! 1. the address itself and its 12/8 character prefixes
//! 2. the address with identifier context terms
//! 3. the ticker symbol, when known
//! 4. the token name, when known and short

use crate::{TokenAddress, TokenMetadata, Vocabulary};

/// Prefix lengths searched alongside the full address; posts often truncate
pub const ADDRESS_PREFIX_LENGTHS: [usize; 2] = [12, 8];

/// Names longer than this many words are not searched
pub const MAX_NAME_WORDS: usize = 3;

/// Build the ordered query list for a token
pub fn synthesize_queries(
    address: &TokenAddress,
    metadata: &TokenMetadata,
    vocabulary: &Vocabulary,
) -> Vec<String> {
    let scope = vocabulary
        .primary_domain()
        .map(|domain| format!("site:{} ", domain))
        .unwrap_or_default();
    let short = address.prefix(8);

    let mut queries = Vec::new();

    queries.push(format!("{}{}", scope, address));
    for len in ADDRESS_PREFIX_LENGTHS {
        queries.push(format!("{}{}", scope, address.prefix(len)));
    }

    for term in &vocabulary.context.identifier_terms {
        queries.push(format!("{}{} {}", scope, address, term));
    }

    if let Some(symbol) = metadata.searchable_symbol() {
        let symbol = symbol.trim_start_matches('$');
        queries.push(format!("{}{} {}", scope, symbol, short));
        for term in &vocabulary.context.ticker_terms {
            queries.push(format!("{}${} {}", scope, symbol, term));
        }
    }

    if let Some(name) = metadata.searchable_name() {
        if name.split_whitespace().count() <= MAX_NAME_WORDS {
            queries.push(format!("{}\"{}\" {}", scope, name, short));
            for term in &vocabulary.context.ticker_terms {
                queries.push(format!("{}\"{}\" {}", scope, name, term));
            }
        }
    }

    // Keep the first occurrence so ordering is preserved
    let mut seen = std::collections::HashSet::new();
    queries.retain(|q| seen.insert(q.clone()));
    queries
}
