//! Error types shared between client and server.
//!
//! The `QuoteError` enum unifies the failure cases every hop of the bid relay can hit:
//! an expired deadline, a missing pair in the upstream envelope, a malformed JSON payload,
//! an empty bid, or a transport/I/O problem. Each variant maps to a coarse
//! [`FailureKind`] so callers can decide whether to propagate or only log.
use std::io;
use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a failure, independent of where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A bounded operation did not complete within its budget.
    DeadlineExceeded,
    /// An unknown route, or the pair code is absent from the upstream payload.
    NotFound,
    /// JSON could not be parsed at some boundary.
    MalformedPayload,
    /// A rate quote arrived without a bid.
    InvariantViolation,
    /// Schema creation or insert failed.
    Storage,
    /// The peer could not be reached or answered with an unexpected status.
    Transport,
    /// Local filesystem failure.
    Io,
}

/// Names the bounded operation a deadline was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Operation {
    /// Outbound call to the pricing API.
    #[strum(serialize = "upstream fetch")]
    UpstreamFetch,
    /// Insert of one quote record.
    #[strum(serialize = "storage insert")]
    StorageInsert,
    /// Call from the requester to the quote service.
    #[strum(serialize = "quote request")]
    QuoteRequest,
}

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The operation was cancelled because its budget ran out.
    #[error("{operation} exceeded its {}ms budget", .budget.as_millis())]
    DeadlineExceeded {
        /// Which bounded operation expired.
        operation: Operation,
        /// The budget that was attached to it.
        budget: Duration,
    },

    /// The upstream envelope did not contain the requested pair code.
    #[error("currency data not found in response: {0}")]
    PairNotFound(String),

    /// Failure while decoding JSON via serde_json.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// A rate quote carried an empty bid.
    #[error("currency's bid is empty")]
    EmptyBid,

    /// The peer answered with a status other than success.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// Connection, TLS or protocol level failure from the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configured deadlines do not nest.
    #[error("invalid budget chain: {0}")]
    InvalidBudget(String),

    /// A currency code outside the supported set.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

impl QuoteError {
    /// Build a deadline error for `operation` with the budget it was given.
    pub fn deadline(operation: Operation, budget: Duration) -> Self {
        QuoteError::DeadlineExceeded { operation, budget }
    }

    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            QuoteError::DeadlineExceeded { .. } => FailureKind::DeadlineExceeded,
            QuoteError::PairNotFound(_) => FailureKind::NotFound,
            QuoteError::MalformedPayload(_) => FailureKind::MalformedPayload,
            QuoteError::EmptyBid => FailureKind::InvariantViolation,
            QuoteError::UnexpectedStatus(_) | QuoteError::Transport(_) => FailureKind::Transport,
            QuoteError::Io(_) => FailureKind::Io,
            QuoteError::InvalidBudget(_) | QuoteError::UnknownCurrency(_) => {
                FailureKind::InvariantViolation
            }
        }
    }
}
