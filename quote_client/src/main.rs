//! Quote Client: asks the quote server for the current USD-BRL bid and records it.
//!
//! The whole call is bounded by the requester budget (300ms by default). On success the
//! raw bid is written to the output file; on any failure the error is logged, nothing is
//! written and the process exits with a non-zero status.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client --server-url http://localhost:8080/cotacao --output ./cotacao.txt
//! ```
#![warn(missing_docs)]
use std::time::Duration;

use clap::Parser;
use log::error;
use quote_client::args::Args;
use quote_client::{QuoteRequester, fetch_and_record};
use quote_common::{QuoteError, Result};

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();
    args.budgets().validate()?;

    let requester =
        QuoteRequester::with_url(args.server_url.as_str(), Duration::from_millis(args.timeout_ms))?;
    if let Err(e) = fetch_and_record(&requester, &args.output).await {
        error!("Failed to fetch the bid ({:?}): {}", e.kind(), e);
        return Err(e);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
