// File: src/services/quotes/models.rs
use crate::error::{QuoteError, Stage};
use crate::utils::serde_str::{decimal_from_str, decimal_to_str, i64_from_str};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// USD/BRL quote as published by the provider, one row per request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteRecord {
    pub code: String,
    #[serde(rename = "codein")]
    pub code_in: String,
    pub name: String,
    #[serde(deserialize_with = "decimal_from_str")]
    pub high: Decimal,
    #[serde(deserialize_with = "decimal_from_str")]
    pub low: Decimal,
    #[serde(rename = "varBid", deserialize_with = "decimal_from_str")]
    pub var_bid: Decimal,
    #[serde(rename = "pctChange", deserialize_with = "decimal_from_str")]
    pub pct_change: Decimal,
    #[serde(deserialize_with = "decimal_from_str")]
    pub bid: Decimal,
    #[serde(deserialize_with = "decimal_from_str")]
    pub ask: Decimal,
    #[serde(deserialize_with = "i64_from_str")]
    pub timestamp: i64,
    pub create_date: String,
}

/// The only part of a quote handed back to clients: `{"bid":"5.4321"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteProjection {
    #[serde(serialize_with = "decimal_to_str")]
    pub bid: Decimal,
}

#[derive(Debug, Deserialize)]
struct ProviderEnvelope {
    #[serde(rename = "USDBRL")]
    usdbrl: QuoteRecord,
}

impl QuoteRecord {
    pub fn projection(&self) -> QuoteProjection {
        QuoteProjection { bid: self.bid }
    }
}

/// Parses the provider body `{"USDBRL": {...}}`.
pub fn parse_quote(body: &[u8]) -> Result<QuoteRecord, QuoteError> {
    serde_json::from_slice::<ProviderEnvelope>(body)
        .map(|envelope| envelope.usdbrl)
        .map_err(|source| QuoteError::Decode {
            stage: Stage::Parse,
            source,
        })
}


#[cfg(test)]
mod tests {
    use super::fixtures::provider_body;
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_provider_body() {
        let record = parse_quote(provider_body("5.4321").as_bytes()).unwrap();

        assert_eq!(record.code, "USD");
        assert_eq!(record.code_in, "BRL");
        assert_eq!(record.bid, Decimal::from_str("5.4321").unwrap());
        assert_eq!(record.pct_change, Decimal::from_str("0.23").unwrap());
        assert_eq!(record.timestamp, 1_718_900_000);
        assert_eq!(record.create_date, "2024-06-20 13:33:20");
    }

    #[test]
    fn test_projection_keeps_bid_text() {
        let record = parse_quote(provider_body("5.4320").as_bytes()).unwrap();
        let json = serde_json::to_string(&record.projection()).unwrap();
        assert_eq!(json, r#"{"bid":"5.4320"}"#);
    }

    #[test]
    fn test_unquoted_number_is_parse_error() {
        let body = provider_body("5.4321").replace(r#""bid":"5.4321""#, r#""bid":5.4321"#);
        let err = parse_quote(body.as_bytes()).unwrap_err();
        assert!(matches!(err, QuoteError::Decode { stage: Stage::Parse, .. }));
    }

    #[test]
    fn test_malformed_and_foreign_bodies_are_parse_errors() {
        for body in ["not json", "{}", r#"{"EURBRL":{}}"#] {
            let err = parse_quote(body.as_bytes()).unwrap_err();
            assert!(err.to_string().starts_with("response parse: failed to parse JSON"));
        }
    }
}
