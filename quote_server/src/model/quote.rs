//! Rate quote data model and upstream envelope decoding.
//!
//! A `RateQuote` is one observation of a currency pair as published by the pricing API.
//! The API emits every field as a JSON string and the service keeps them that way: no
//! numeric coercion happens anywhere between the upstream body and the database row.

use std::collections::HashMap;

use quote_common::{Bid, CurrencyPair, QuoteError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Market quote for a single currency pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateQuote {
    /// Base currency code, e.g. `USD`.
    pub code: String,
    /// Quote currency code, e.g. `BRL`.
    pub codein: String,
    /// Display name, e.g. `Dólar Americano/Real Brasileiro`.
    pub name: String,
    /// Session high.
    pub high: String,
    /// Session low.
    pub low: String,
    /// Absolute bid change.
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// Percent change.
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// Bid price; the value relayed to callers.
    pub bid: String,
    /// Ask price.
    pub ask: String,
    /// Upstream timestamp (seconds since the Unix epoch, as text).
    pub timestamp: String,
    /// Human-readable creation date.
    pub create_date: String,
}

impl RateQuote {
    /// Decode the pricing API envelope and pick the entry for `pair`.
    ///
    /// The body is an object keyed by the pair code (`{"USDBRL": {...}}`). A missing key is
    /// reported as [`QuoteError::PairNotFound`]; an empty object is not a zero quote.
    pub fn from_envelope(body: &[u8], pair: &CurrencyPair) -> Result<Self, QuoteError> {
        let mut envelope: HashMap<String, Value> = serde_json::from_slice(body)?;
        let code = pair.code();
        let raw = envelope
            .remove(&code)
            .ok_or(QuoteError::PairNotFound(code))?;
        Ok(serde_json::from_value(raw)?)
    }

    /// The bid scalar; fails when the quote carries an empty bid.
    pub fn bid(&self) -> Result<Bid, QuoteError> {
        Bid::new(self.bid.as_str())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::RateQuote;

    /// Envelope shaped like a live USD-BRL response.
    pub const USD_BRL_ENVELOPE: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4612","low":"5.4101","varBid":"0.0123","pctChange":"0.23","bid":"5.43","ask":"5.4312","timestamp":"1718040000","create_date":"2024-06-10 14:20:00"}}"#;

    pub fn usd_brl() -> RateQuote {
        RateQuote {
            code: "USD".into(),
            codein: "BRL".into(),
            name: "Dólar Americano/Real Brasileiro".into(),
            high: "5.4612".into(),
            low: "5.4101".into(),
            var_bid: "0.0123".into(),
            pct_change: "0.23".into(),
            bid: "5.43".into(),
            ask: "5.4312".into(),
            timestamp: "1718040000".into(),
            create_date: "2024-06-10 14:20:00".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{USD_BRL_ENVELOPE, usd_brl};
    use super::*;
    use quote_common::FailureKind;

    #[test]
    fn decodes_pair_entry_from_envelope() {
        let quote = RateQuote::from_envelope(USD_BRL_ENVELOPE.as_bytes(), &CurrencyPair::USD_BRL)
            .unwrap();
        assert_eq!(quote, usd_brl());
        assert_eq!(quote.bid().unwrap().as_str(), "5.43");
    }

    #[test]
    fn missing_pair_key_is_not_found() {
        let err = RateQuote::from_envelope(br#"{"EURBRL":{"bid":"6.01"}}"#, &CurrencyPair::USD_BRL)
            .unwrap_err();
        assert!(matches!(&err, QuoteError::PairNotFound(code) if code == "USDBRL"));
        assert_eq!(err.kind(), FailureKind::NotFound);

        let err = RateQuote::from_envelope(b"{}", &CurrencyPair::USD_BRL).unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        for body in [&b"<html>"[..], &b"[]"[..], &br#"{"USDBRL":"5.43"}"#[..], &br#"{"USDBRL":{"bid":5.43}}"#[..]] {
            let err = RateQuote::from_envelope(body, &CurrencyPair::USD_BRL).unwrap_err();
            assert_eq!(err.kind(), FailureKind::MalformedPayload, "body {:?}", body);
        }
    }

    #[test]
    fn empty_bid_fails_extraction() {
        let quote =
            RateQuote::from_envelope(br#"{"USDBRL":{"bid":""}}"#, &CurrencyPair::USD_BRL).unwrap();
        assert!(matches!(quote.bid(), Err(QuoteError::EmptyBid)));
    }

    #[test]
    fn absent_fields_decode_as_empty_text() {
        let quote =
            RateQuote::from_envelope(br#"{"USDBRL":{"bid":"5.43"}}"#, &CurrencyPair::USD_BRL)
                .unwrap();
        assert_eq!(quote.bid, "5.43");
        assert!(quote.code.is_empty() && quote.create_date.is_empty());
    }
}
