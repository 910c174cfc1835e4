//! Domain models for the quote server.
//!
//! - `quote`: `RateQuote` as published by the pricing API, and its envelope decoding.

pub mod quote;

pub use quote::RateQuote;
