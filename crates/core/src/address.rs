//! # Address Module
//!
//! Checked participant identifiers. An address is `0x` followed by 40 hex
//! digits, normalized to lowercase on parse. The all-zero address parses
//! (it is syntactically valid) but is rejected as a stream participant.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Participant identifier (employer or employee).
///
/// # Examples
/// ```
/// use paystream_core::Address;
///
/// let addr = Address::parse("0x00000000000000000000000000000000000000A1").unwrap();
/// assert_eq!(addr.as_str(), "0x00000000000000000000000000000000000000a1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

const HEX_LEN: usize = 40;

impl Address {
    /// Parse and normalize an address string.
    pub fn parse(s: &str) -> EngineResult<Self> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| EngineError::InvalidParticipants(format!("missing 0x prefix: {s}")))?;

        if hex.len() != HEX_LEN {
            return Err(EngineError::InvalidParticipants(format!(
                "expected {HEX_LEN} hex digits, got {}",
                hex.len()
            )));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidParticipants(format!(
                "non-hex character in address: {s}"
            )));
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// The all-zero address, invalid as a stream participant.
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(HEX_LEN)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display contexts (`0x1234...abcd`).
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let addr = Address::parse("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Address::parse("abcdef").is_err());
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("0xZZcdef0123456789abcdef0123456789abcdef01").is_err());
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::zero();
        assert!(zero.is_zero());

        let nonzero = Address::parse("0x0000000000000000000000000000000000000001").unwrap();
        assert!(!nonzero.is_zero());
    }

    #[test]
    fn test_short_form() {
        let addr = Address::parse("0xabcdef0123456789abcdef0123456789abcdef01").unwrap();
        assert_eq!(addr.short(), "0xabcd...ef01");
    }

    #[test]
    fn test_equality_ignores_source_case() {
        let a = Address::parse("0xAAAA000000000000000000000000000000000001").unwrap();
        let b = Address::parse("0xaaaa000000000000000000000000000000000001").unwrap();
        assert_eq!(a, b);
    }
}
