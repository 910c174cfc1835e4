//! Common types and utilities shared by the quote server and client.
//!
//! This crate aggregates:
//! - `error`: unified error type `QuoteError` and its `FailureKind` taxonomy.
//! - `result`: handy `Result<T, QuoteError>` alias.
//! - `currency`: currency codes and the pair addressed upstream.
//! - `bid`: the bid scalar relayed from service to requester.
//! - `budget`: the nested deadline budgets and the helper that enforces them.
//! - `net`: networking constants.
#![warn(missing_docs)]
pub mod bid;
pub mod budget;
pub mod currency;
pub mod error;
pub mod net;
pub mod result;

pub use bid::Bid;
pub use budget::BudgetChain;
pub use currency::{Currency, CurrencyPair};
pub use error::{FailureKind, Operation, QuoteError};
pub use result::Result;
