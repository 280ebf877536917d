//! Data provider registry
//!
//! A provider is an endpoint template plus a parser that turns the decoded
//! body into a result, or `None` when the provider had nothing usable.

use serde_json::Value;
use std::fmt;

use tokenscope_core::TokenAddress;

/// Placeholder substituted with the token address
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

/// Parses a provider response for one token
pub type Parser<T> = fn(&Value, &TokenAddress) -> Option<T>;

/// One entry of an ordered provider list
pub struct Provider<T> {
    /// Human-readable name, also used as the result source label
    pub name: String,
    /// URL template with an {address} placeholder
    pub url_template: String,
    pub parser: Parser<T>,
}

impl<T> Provider<T> {
    pub fn new(name: &str, url_template: &str, parser: Parser<T>) -> Self {
        Self {
            name: name.to_string(),
            url_template: url_template.to_string(),
            parser,
        }
    }

    /// Build the request URL for a token
    pub fn build_url(&self, address: &TokenAddress) -> String {
        self.url_template
            .replace(ADDRESS_PLACEHOLDER, &urlencoding::encode(address.as_str()))
    }

    /// Same provider pointed at another URL template
    pub fn with_url_template(mut self, url_template: &str) -> Self {
        self.url_template = url_template.to_string();
        self
    }
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            url_template: self.url_template.clone(),
            parser: self.parser,
        }
    }
}

impl<T> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("url_template", &self.url_template)
            .finish()
    }
}

/// Decimal from a JSON number or a numeric string with thousands separators
pub fn parse_decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Non-blank string field
pub fn json_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String or number field rendered as text
pub fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        other => json_string(other),
    }
}

/// Token decimals, when they fit a u8
pub fn json_decimals(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|d| u8::try_from(d).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
