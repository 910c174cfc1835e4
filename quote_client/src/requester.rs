//! Calling the quote service.
//!
//! One call is one `GET` against the service URL bounded by the requester budget, from
//! connect to the decoded body. The budget is deliberately looser than the service's own
//! upstream and storage budgets combined (see `quote_common::budget`).
use std::time::Duration;

use log::debug;
use quote_common::budget;
use quote_common::{Bid, Operation, QuoteError};

/// Client for the quote service.
pub struct QuoteRequester {
    client: reqwest::Client,
    url: String,
    budget: Duration,
}

impl QuoteRequester {
    /// Requester for `url`, bounded by `budget`.
    pub fn with_url(url: impl Into<String>, budget: Duration) -> Result<Self, QuoteError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
            budget,
        })
    }

    /// URL this requester calls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ask the service for the current bid.
    pub async fn request_bid(&self) -> Result<Bid, QuoteError> {
        budget::within(Operation::QuoteRequest, self.budget, self.request_unbounded()).await
    }

    async fn request_unbounded(&self) -> Result<Bid, QuoteError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(QuoteError::UnexpectedStatus(status.as_u16()));
        }
        let body = response.bytes().await?;
        debug!("Service answered with {} bytes", body.len());
        Bid::from_json_bytes(&body)
    }
}
