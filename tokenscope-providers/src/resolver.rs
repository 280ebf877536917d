//! Fallback source resolution
//!
//! Providers are tried in order, one fetch each. The first one whose parser
//! accepts the response wins and the rest are never contacted. A provider
//! that fails or has no data only moves the resolver on to the next one, and
//! an exhausted list yields a labelled fallback value instead of an error.

use tracing::{debug, info, warn};

use tokenscope_core::{FallbackCause, MarketSnapshot, TokenAddress, TokenMetadata};
use tokenscope_net::JsonFetcher;

use crate::Provider;

/// A value a resolver can produce, including its fallback form
pub trait Resolvable: Sized {
    /// Name used in log lines
    const KIND: &'static str;

    /// Placeholder returned when every provider failed
    fn fallback(address: &TokenAddress, cause: FallbackCause) -> Self;
}

impl Resolvable for TokenMetadata {
    const KIND: &'static str = "metadata";

    fn fallback(address: &TokenAddress, _cause: FallbackCause) -> Self {
        TokenMetadata::fallback(address)
    }
}

impl Resolvable for MarketSnapshot {
    const KIND: &'static str = "market data";

    fn fallback(_address: &TokenAddress, cause: FallbackCause) -> Self {
        MarketSnapshot::fallback(cause)
    }
}

/// Resolve a value from an ordered provider list
pub async fn resolve<T: Resolvable>(
    fetcher: &dyn JsonFetcher,
    providers: &[Provider<T>],
    address: &TokenAddress,
) -> T {
    let mut cause = FallbackCause::Unreachable;

    for provider in providers {
        debug!("Trying {} for {}", provider.name, T::KIND);

        let body = match fetcher.get_json(&provider.build_url(address)).await {
            Ok(body) => body,
            Err(e) if e.is_response() => {
                debug!("{} returned no usable response: {}", provider.name, e);
                continue;
            }
            Err(e) => {
                warn!("{} failed: {}", provider.name, e);
                continue;
            }
        };

        match (provider.parser)(&body, address) {
            Some(result) => {
                info!("Resolved {} from {}", T::KIND, provider.name);
                return result;
            }
            None => {
                debug!("{} has no {} for {}", provider.name, T::KIND, address);
                cause = FallbackCause::NoData;
            }
        }
    }

    info!("All {} providers exhausted, using fallback", T::KIND);
    T::fallback(address, cause)
}
