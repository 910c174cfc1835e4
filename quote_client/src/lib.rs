//! Quote client library.
//!
//! - `requester`: `QuoteRequester`, the bounded call to the quote service.
//! - `output`: writing the received bid to a plain-text file.
//! - `args`: command-line configuration.
#![warn(missing_docs)]
pub mod args;
pub mod output;
pub mod requester;

use std::path::Path;

use log::info;
use quote_common::{Bid, QuoteError};

pub use output::write_bid;
pub use requester::QuoteRequester;

/// Request the current bid and record it to `output`.
///
/// Nothing is written unless the request succeeds; failures are returned as-is, without
/// retrying.
pub async fn fetch_and_record(requester: &QuoteRequester, output: &Path) -> Result<Bid, QuoteError> {
    let bid = requester.request_bid().await?;
    info!("Received bid {} from {}", bid, requester.url());
    write_bid(output, &bid)?;
    info!("Bid written to {}", output.display());
    Ok(bid)
}
