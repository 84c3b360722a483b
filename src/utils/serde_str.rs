// File: src/utils/serde_str.rs
//
// The quote provider sends every number as a quoted string. These helpers accept
// only that form: a bare JSON number is rejected as an invalid type.
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer, de};
use std::str::FromStr;

pub fn decimal_from_str<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Decimal::from_str(raw.trim())
        .map_err(|e| de::Error::custom(format!("invalid decimal '{}': {}", raw, e)))
}

pub fn i64_from_str<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|e| de::Error::custom(format!("invalid integer '{}': {}", raw, e)))
}

/// Writes the decimal as a JSON string, keeping its scale ("5.4320" stays "5.4320").
pub fn decimal_to_str<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde(
            deserialize_with = "decimal_from_str",
            serialize_with = "decimal_to_str"
        )]
        price: Decimal,
        #[serde(deserialize_with = "i64_from_str")]
        ts: i64,
    }

    #[test]
    fn test_quoted_numbers_are_coerced() {
        let sample: Sample =
            serde_json::from_str(r#"{"price":"5.4320","ts":"1718900000"}"#).unwrap();
        assert_eq!(sample.price.to_string(), "5.4320");
        assert_eq!(sample.ts, 1_718_900_000);
        assert_eq!(
            serde_json::to_string(&sample).unwrap(),
            r#"{"price":"5.4320","ts":1718900000}"#
        );
    }

    #[test]
    fn test_bare_numbers_are_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"price":5.43,"ts":"1"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"price":"5.43","ts":1}"#).is_err());
    }

    #[test]
    fn test_garbage_strings_are_rejected() {
        let err = serde_json::from_str::<Sample>(r#"{"price":"abc","ts":"1"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid decimal 'abc'"));
        assert!(serde_json::from_str::<Sample>(r#"{"price":"1","ts":"1.5"}"#).is_err());
    }
}
