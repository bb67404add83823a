//! GraphQL scalar conversions between backend wire types and alloy types.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// Parse a GraphQL BigInt string into a U256.
///
/// Accepts decimal strings and 0x-prefixed hex strings.
pub fn parse_bigint(s: &str) -> Option<U256> {
    U256::from_str(s).ok()
}

/// Deserialize a BigInt string into a U256.
pub fn deserialize_bigint<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    parse_bigint(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid BigInt: {}", s)))
}

/// Serialize a U256 as a decimal BigInt string.
pub fn serialize_bigint<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bigint_decimal() {
        assert_eq!(parse_bigint("1000000"), Some(U256::from(1_000_000u64)));
    }

    #[test]
    fn test_parse_bigint_hex() {
        assert_eq!(parse_bigint("0xff"), Some(U256::from(255u64)));
    }

    #[test]
    fn test_parse_bigint_invalid() {
        assert_eq!(parse_bigint("not a number"), None);
    }

    #[test]
    fn test_parse_bigint_large_value() {
        // 1e24, larger than u64
        let parsed = parse_bigint("1000000000000000000000000");
        assert!(parsed.is_some());
    }
}
