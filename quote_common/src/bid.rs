//! The bid scalar exchanged between the quote service and the requester.
//!
//! On the wire a `Bid` is a bare JSON string (`"5.43"`). The value is kept as the exact
//! text the pricing API produced; it is never parsed into a number.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Non-empty bid price text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bid(String);

impl Bid {
    /// Wraps `raw`, rejecting an empty value.
    pub fn new(raw: impl Into<String>) -> Result<Self, QuoteError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(QuoteError::EmptyBid);
        }
        Ok(Bid(raw))
    }

    /// The raw bid text, without JSON quoting.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode the bid as its JSON wire form.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, QuoteError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a bid from its JSON wire form.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, QuoteError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl TryFrom<String> for Bid {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Bid::new(value)
    }
}

impl From<Bid> for String {
    fn from(bid: Bid) -> Self {
        bid.0
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn wire_form_is_a_quoted_string() {
        let bid = Bid::new("5.43").unwrap();
        assert_eq!(bid.to_json_bytes().unwrap(), b"\"5.43\"");
        assert_eq!(Bid::from_json_bytes(b"\"5.43\"").unwrap(), bid);
    }

    #[test]
    fn text_is_kept_verbatim() {
        let bid = Bid::from_json_bytes(b"\"005.4300\"").unwrap();
        assert_eq!(bid.as_str(), "005.4300");
        assert_eq!(bid.to_string(), "005.4300");
    }

    #[test]
    fn empty_bid_is_rejected() {
        assert!(matches!(Bid::new(""), Err(QuoteError::EmptyBid)));
        let err = Bid::from_json_bytes(b"\"\"").unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedPayload);
    }

    #[test]
    fn non_string_payload_is_malformed() {
        for body in [&b"5.43"[..], &b"{\"bid\":\"5.43\"}"[..], &b"not json"[..]] {
            let err = Bid::from_json_bytes(body).unwrap_err();
            assert_eq!(err.kind(), FailureKind::MalformedPayload);
        }
    }
}
