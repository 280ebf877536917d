//! Solana token address validation
//!
//! A token address is a base58 string of 32 to 44 characters. Validation is
//! purely syntactic and never touches the network.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The 58-symbol base58 alphabet (no `0`, `O`, `I` or `l`)
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Shortest accepted address
pub const MIN_ADDRESS_LEN: usize = 32;

/// Longest accepted address
pub const MAX_ADDRESS_LEN: usize = 44;

/// Reasons an address is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Address has {0} characters, expected {MIN_ADDRESS_LEN} to {MAX_ADDRESS_LEN}")]
    Length(usize),

    #[error("Invalid base58 character '{ch}' at position {position}")]
    Character { ch: char, position: usize },
}

/// Check that `candidate` looks like a Solana token address
pub fn validate(candidate: &str) -> bool {
    check(candidate).is_ok()
}

fn check(candidate: &str) -> Result<(), AddressError> {
    if candidate.is_empty() {
        return Err(AddressError::Empty);
    }

    let len = candidate.chars().count();
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&len) {
        return Err(AddressError::Length(len));
    }

    match candidate
        .chars()
        .enumerate()
        .find(|(_, ch)| !BASE58_ALPHABET.contains(*ch))
    {
        Some((position, ch)) => Err(AddressError::Character { ch, position }),
        None => Ok(()),
    }
}

/// A validated token address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TokenAddress(String);

impl TokenAddress {
    /// Validate and wrap an address
    pub fn parse(candidate: &str) -> Result<Self, AddressError> {
        check(candidate)?;
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading `len` characters (the whole address if shorter)
    pub fn prefix(&self, len: usize) -> &str {
        // base58 is ASCII, so byte and char offsets agree
        &self.0[..len.min(self.0.len())]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TokenAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TokenAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUMP_TOKEN: &str = "GBUxQFRXQjSPjkxymAUKPfbUbSpRY8Ui7az1HCxtpump";

    #[test]
    fn test_accepts_real_address() {
        assert!(validate(PUMP_TOKEN));
        assert!(validate("So11111111111111111111111111111111111111112"));
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(!validate(""));
        assert!(!validate("abc"));
        assert!(!validate(&"1".repeat(31)));
        assert!(!validate(&"1".repeat(45)));
        assert!(validate(&"1".repeat(32)));
        assert!(validate(&"z".repeat(44)));
    }

    #[test]
    fn test_rejects_excluded_symbols() {
        for bad in ['0', 'O', 'I', 'l', '-', ' ', 'é'] {
            let candidate = format!("{}{}", &PUMP_TOKEN[..40], bad);
            assert!(!validate(&candidate), "should reject {:?}", bad);
        }
    }

    #[test]
    fn test_every_alphabet_symbol_accepted() {
        let candidate: String = BASE58_ALPHABET.chars().take(44).collect();
        assert!(validate(&candidate));
        let tail: String = BASE58_ALPHABET.chars().skip(26).collect();
        assert_eq!(tail.len(), 32);
        assert!(validate(&tail));
    }

    #[test]
    fn test_parse_reports_reason() {
        assert_eq!(TokenAddress::parse(""), Err(AddressError::Empty));
        assert_eq!(TokenAddress::parse("abc"), Err(AddressError::Length(3)));

        let with_zero = format!("0{}", &PUMP_TOKEN[1..]);
        assert_eq!(
            TokenAddress::parse(&with_zero),
            Err(AddressError::Character { ch: '0', position: 0 })
        );
    }

    #[test]
    fn test_prefix() {
        let address: TokenAddress = PUMP_TOKEN.parse().unwrap();
        assert_eq!(address.prefix(8), "GBUxQFRX");
        assert_eq!(address.prefix(12), "GBUxQFRXQjSP");
        assert_eq!(address.prefix(100), PUMP_TOKEN);
        assert_eq!(address.to_string(), PUMP_TOKEN);
    }
}
