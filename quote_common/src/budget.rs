//! Deadline budgets for the three bounded hops.
//!
//! The requester waits on the service, which waits on the upstream fetch followed by the
//! storage insert, so the budgets must nest: the requester budget has to cover the other
//! two plus room for local networking and serialization.
//!
//! [`within`] attaches a budget to one future at the moment it is awaited; dropping the
//! future on expiry cancels whatever it had in flight.
use std::future::Future;
use std::time::Duration;

use crate::error::{Operation, QuoteError};

/// Budget for the upstream fetch (connect + response + body).
pub const UPSTREAM_BUDGET: Duration = Duration::from_millis(200);
/// Budget for the insert statement, excluding open and schema creation.
pub const STORAGE_INSERT_BUDGET: Duration = Duration::from_millis(10);
/// Budget for the whole requester call.
pub const REQUESTER_BUDGET: Duration = Duration::from_millis(300);
/// Least headroom the requester must keep over the service's own budgets.
pub const MIN_SLACK: Duration = Duration::from_millis(20);

/// The three budgets of one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetChain {
    /// See [`UPSTREAM_BUDGET`].
    pub upstream: Duration,
    /// See [`STORAGE_INSERT_BUDGET`].
    pub storage_insert: Duration,
    /// See [`REQUESTER_BUDGET`].
    pub requester: Duration,
}

impl Default for BudgetChain {
    fn default() -> Self {
        Self {
            upstream: UPSTREAM_BUDGET,
            storage_insert: STORAGE_INSERT_BUDGET,
            requester: REQUESTER_BUDGET,
        }
    }
}

impl BudgetChain {
    /// Time the service may spend before it has to answer.
    pub fn service_total(&self) -> Duration {
        self.upstream + self.storage_insert
    }

    /// Headroom the requester keeps over the service, if any.
    pub fn slack(&self) -> Option<Duration> {
        self.requester.checked_sub(self.service_total())
    }

    /// Checks that every budget is non-zero and that
    /// `requester >= upstream + storage_insert + MIN_SLACK`.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.upstream.is_zero() || self.storage_insert.is_zero() || self.requester.is_zero() {
            return Err(QuoteError::InvalidBudget(format!(
                "budgets must be non-zero: {:?}",
                self
            )));
        }
        match self.slack() {
            Some(slack) if slack >= MIN_SLACK => Ok(()),
            _ => Err(QuoteError::InvalidBudget(format!(
                "requester {}ms must exceed upstream {}ms + storage {}ms by at least {}ms",
                self.requester.as_millis(),
                self.upstream.as_millis(),
                self.storage_insert.as_millis(),
                MIN_SLACK.as_millis()
            ))),
        }
    }
}

/// Runs `fut` under `budget`, mapping expiry to [`QuoteError::DeadlineExceeded`].
///
/// The deadline starts when this function is polled for the first time. On expiry `fut` is
/// dropped, which cancels any request it had in flight.
pub async fn within<T, E, F>(operation: Operation, budget: Duration, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<QuoteError>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(result) => result,
        Err(_) => Err(QuoteError::deadline(operation, budget).into()),
    }
}
