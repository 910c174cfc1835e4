//! Quote server.
//!
//! Serves `GET /cotacao`: each request fetches the current USD-BRL quote from the pricing
//! API under the upstream budget, stores one row in the SQLite file under the storage
//! budget and answers with the bid as a JSON string. See `quote_server::service` for the
//! request flow and failure policy.
//!
//! Usage example (CLI):
//! ```bash
//! RUST_LOG=debug quote_server --bind 127.0.0.1:8080 --db-path ./currency.db
//! ```
#![warn(missing_docs)]
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use quote_common::{QuoteError, Result};
use quote_server::args::Args;
use quote_server::{HttpGateway, QuoteService, SqliteStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();
    let budgets = args.budgets();
    budgets.validate()?;
    info!(
        "Budgets: upstream {}ms, storage insert {}ms, requester {}ms",
        budgets.upstream.as_millis(),
        budgets.storage_insert.as_millis(),
        budgets.requester.as_millis()
    );

    let gateway = HttpGateway::with_base_url(args.upstream_url.as_str(), budgets.upstream)?;
    let store = SqliteStore::with_budget(args.db_path.clone(), budgets.storage_insert);
    info!("Persisting quotes to {} ({:?})", store.path().display(), args.persistence);

    let service = QuoteService::new(Arc::new(gateway), Arc::new(store)).with_policy(args.persistence);
    let listener = TcpListener::bind(&args.bind).await?;
    service.serve(listener, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
