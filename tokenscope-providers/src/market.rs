//! Market data providers

use serde_json::Value;

use tokenscope_core::{MarketSnapshot, MarketValue, TokenAddress};

use crate::metadata::{first_pair, jupiter_entry, DEXSCREENER_TOKENS_URL, JUPITER_PRICE_URL};
use crate::{json_string, parse_decimal, Provider};

/// Dex label reported for Jupiter prices
pub const JUPITER_DEX: &str = "Jupiter Aggregator";

fn value(field: &Value) -> MarketValue {
    MarketValue::from_option(parse_decimal(field))
}

pub fn parse_dexscreener_market(body: &Value, _address: &TokenAddress) -> Option<MarketSnapshot> {
    let pair = first_pair(body)?;

    let mut snapshot = MarketSnapshot::resolved("DexScreener");
    snapshot.price_usd = value(&pair["priceUsd"]);
    snapshot.market_cap = value(&pair["fdv"]);
    snapshot.liquidity_usd = value(&pair["liquidity"]["usd"]);
    snapshot.volume_24h_usd = value(&pair["volume"]["h24"]);
    snapshot.price_change_24h_pct = value(&pair["priceChange"]["h24"]);
    snapshot.dex = json_string(&pair["dexId"]);
    Some(snapshot)
}

pub fn parse_jupiter_market(body: &Value, address: &TokenAddress) -> Option<MarketSnapshot> {
    let entry = jupiter_entry(body, address)?;

    let mut snapshot = MarketSnapshot::resolved("Jupiter");
    snapshot.price_usd = value(&entry["price"]);
    snapshot.dex = Some(JUPITER_DEX.to_string());
    Some(snapshot)
}

/// Market providers in priority order
pub fn market_providers() -> Vec<Provider<MarketSnapshot>> {
    vec![
        Provider::new("DexScreener", DEXSCREENER_TOKENS_URL, parse_dexscreener_market),
        Provider::new("Jupiter", JUPITER_PRICE_URL, parse_jupiter_market),
    ]
}
