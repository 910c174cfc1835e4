//! Command-line arguments for the quote server.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quote_common::budget::{STORAGE_INSERT_BUDGET, UPSTREAM_BUDGET};
use quote_common::net::{self, UPSTREAM_BASE_URL};
use quote_common::BudgetChain;

use crate::persistence::DEFAULT_DB_PATH;
use crate::service::PersistencePolicy;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Relays the current USD-BRL bid over HTTP", long_about = None)]
pub struct Args {
    /// Address to listen on.
    #[clap(long, default_value_t = net::bind_addr())]
    pub bind: String,

    /// SQLite file that receives one row per fetched quote.
    #[clap(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Base URL of the pricing API; `USD-BRL` is appended to it.
    #[clap(long, default_value = UPSTREAM_BASE_URL)]
    pub upstream_url: String,

    /// Budget for the upstream fetch, in milliseconds.
    #[clap(long, default_value_t = UPSTREAM_BUDGET.as_millis() as u64)]
    pub upstream_timeout_ms: u64,

    /// Budget for the storage insert, in milliseconds.
    #[clap(long, default_value_t = STORAGE_INSERT_BUDGET.as_millis() as u64)]
    pub storage_timeout_ms: u64,

    /// Whether a failed insert fails the request.
    #[clap(long, value_enum, default_value_t = PersistencePolicy::BestEffort)]
    pub persistence: PersistencePolicy,
}

impl Args {
    /// The server's budgets, paired with the default requester budget.
    pub fn budgets(&self) -> BudgetChain {
        BudgetChain {
            upstream: Duration::from_millis(self.upstream_timeout_ms),
            storage_insert: Duration::from_millis(self.storage_timeout_ms),
            ..BudgetChain::default()
        }
    }
}
