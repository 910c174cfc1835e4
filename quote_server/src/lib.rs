//! Quote server library.
//!
//! Building blocks of the bid relay, wired together by the `quote_server` binary:
//!
//! - `gateway`: `RateGateway` and the HTTP client for the pricing API.
//! - `persistence`: `QuoteStore` and the SQLite-backed append-only writer.
//! - `service`: `QuoteService`, the HTTP endpoint orchestrating both per request.
//! - `model`: `RateQuote` and upstream envelope decoding.
//! - `args`: command-line configuration.
#![warn(missing_docs)]
pub mod args;
pub mod gateway;
pub mod model;
pub mod persistence;
pub mod service;

pub use gateway::{HttpGateway, RateGateway};
pub use model::RateQuote;
pub use persistence::{QuoteRecord, QuoteStore, SqliteStore, StoreError};
pub use service::{PersistencePolicy, QuoteService, ServiceError};
