//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quote_common::budget::REQUESTER_BUDGET;
use quote_common::{BudgetChain, net};

use crate::output::DEFAULT_OUTPUT_PATH;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Fetches the current USD-BRL bid from the quote server", long_about = None)]
pub struct Args {
    /// Full URL of the quote service route.
    #[clap(long, default_value_t = net::service_url())]
    pub server_url: String,

    /// File that receives the raw bid text.
    #[clap(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Budget for the whole call, in milliseconds.
    #[clap(long, default_value_t = REQUESTER_BUDGET.as_millis() as u64)]
    pub timeout_ms: u64,
}

impl Args {
    /// The requester budget, paired with the default service budgets.
    pub fn budgets(&self) -> BudgetChain {
        BudgetChain {
            requester: Duration::from_millis(self.timeout_ms),
            ..BudgetChain::default()
        }
    }
}
