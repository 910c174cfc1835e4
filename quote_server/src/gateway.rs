//! Outbound client for the pricing API.
//!
//! `RateGateway` is the seam the quote service fetches through; `HttpGateway` is the
//! production implementation. One fetch is one `GET {base_url}{BASE}-{QUOTE}` bounded by
//! the upstream budget from connect to the last body byte. When the budget runs out the
//! request future is dropped, which aborts the connection; nothing read so far is used.
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use quote_common::budget;
use quote_common::{CurrencyPair, Operation, QuoteError};

use crate::model::RateQuote;

/// Source of rate quotes.
#[async_trait]
pub trait RateGateway: Send + Sync {
    /// Fetch the current quote for `pair`.
    async fn fetch(&self, pair: &CurrencyPair) -> Result<RateQuote, QuoteError>;
}

/// Pricing API client over HTTP.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    budget: Duration,
}

impl HttpGateway {
    /// Gateway against `base_url`; the pair segment is appended verbatim, so the URL
    /// should end with `/`.
    pub fn with_base_url(base_url: impl Into<String>, budget: Duration) -> Result<Self, QuoteError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            budget,
        })
    }

    fn url_for(&self, pair: &CurrencyPair) -> String {
        format!("{}{}", self.base_url, pair.path_segment())
    }

    async fn fetch_unbounded(&self, url: &str, pair: &CurrencyPair) -> Result<RateQuote, QuoteError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::UnexpectedStatus(status.as_u16()));
        }
        let body = response.bytes().await?;
        debug!("Upstream answered {} with {} bytes", status, body.len());
        RateQuote::from_envelope(&body, pair)
    }
}

#[async_trait]
impl RateGateway for HttpGateway {
    async fn fetch(&self, pair: &CurrencyPair) -> Result<RateQuote, QuoteError> {
        let url = self.url_for(pair);
        debug!("Fetching {} from {}", pair, url);
        budget::within(
            Operation::UpstreamFetch,
            self.budget,
            self.fetch_unbounded(&url, pair),
        )
        .await
    }
}
