//! Token metadata providers

use serde_json::Value;

use tokenscope_core::{TokenAddress, TokenMetadata};

use crate::{json_decimals, json_string, json_text, Provider};

pub const DEXSCREENER_TOKENS_URL: &str = "https://api.dexscreener.com/latest/dex/tokens/{address}";
pub const JUPITER_PRICE_URL: &str = "https://price.jup.ag/v4/price?ids={address}";
pub const SOLSCAN_META_URL: &str =
    "https://public-api.solscan.io/token/meta?tokenAddress={address}";

/// First pair of a DexScreener response, if it lists any
pub(crate) fn first_pair(body: &Value) -> Option<&Value> {
    body["pairs"].as_array().and_then(|pairs| pairs.first())
}

/// Entry for this token in a Jupiter price response
pub(crate) fn jupiter_entry<'a>(body: &'a Value, address: &TokenAddress) -> Option<&'a Value> {
    body["data"]
        .get(address.as_str())
        .filter(|entry| entry.is_object())
}

pub fn parse_dexscreener_metadata(body: &Value, address: &TokenAddress) -> Option<TokenMetadata> {
    let pair = first_pair(body)?;
    let base = &pair["baseToken"];
    let info = &pair["info"];

    Some(TokenMetadata::resolved(
        "DexScreener",
        json_string(&base["name"]),
        json_string(&base["symbol"]),
        json_decimals(&info["decimals"]),
        json_text(&info["totalSupply"]),
        address,
    ))
}

pub fn parse_jupiter_metadata(body: &Value, address: &TokenAddress) -> Option<TokenMetadata> {
    let entry = jupiter_entry(body, address)?;

    Some(TokenMetadata::resolved(
        "Jupiter",
        json_string(&entry["name"]),
        json_string(&entry["symbol"]),
        json_decimals(&entry["decimals"]),
        None,
        address,
    ))
}

pub fn parse_solscan_metadata(body: &Value, address: &TokenAddress) -> Option<TokenMetadata> {
    let name = json_string(&body["name"]);
    let symbol = json_string(&body["symbol"]);
    if name.is_none() && symbol.is_none() {
        return None;
    }

    let supply = json_text(&body["supply"]).or_else(|| json_text(&body["totalSupply"]));

    Some(TokenMetadata::resolved(
        "Solscan",
        name,
        symbol,
        json_decimals(&body["decimals"]),
        supply,
        address,
    ))
}

/// Metadata providers in priority order
pub fn metadata_providers() -> Vec<Provider<TokenMetadata>> {
    vec![
        Provider::new("DexScreener", DEXSCREENER_TOKENS_URL, parse_dexscreener_metadata),
        Provider::new("Jupiter", JUPITER_PRICE_URL, parse_jupiter_metadata),
        Provider::new("Solscan", SOLSCAN_META_URL, parse_solscan_metadata),
    ]
}
