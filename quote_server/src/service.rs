//! The quote service: one HTTP route that relays the current bid.
//!
//! `QuoteService` owns its collaborators (a [`RateGateway`] and a [`QuoteStore`]) and its
//! route table. Per request it walks
//! `RECEIVED → FETCHING_UPSTREAM → {UPSTREAM_FAILED | PERSISTING → {PERSIST_FAILED | RESPONDED}}`:
//!
//! - the upstream fetch finishes (or fails) before anything is persisted;
//! - the bid is checked right after the fetch, so an empty bid is never stored;
//! - persistence finishes before the response is written, and its failure is handled
//!   according to the configured [`PersistencePolicy`].
//!
//! Every failure becomes an empty `500`; the detail only goes to the log.
use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use log::{debug, error, info, warn};
use quote_common::net::QUOTE_ROUTE;
use quote_common::{Bid, CurrencyPair, FailureKind, QuoteError};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::gateway::RateGateway;
use crate::persistence::{QuoteStore, StoreError};

/// What a failed insert does to a request whose bid is already known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PersistencePolicy {
    /// Log the failure and still answer with the bid.
    #[default]
    BestEffort,
    /// Fail the request with a server error.
    Required,
}

/// Why a request could not be answered with a bid.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The gateway failed (deadline, transport, missing pair, bad JSON).
    #[error("upstream fetch failed: {0}")]
    Upstream(#[source] QuoteError),

    /// The fetched quote carried no usable bid.
    #[error("rate quote rejected: {0}")]
    InvalidQuote(#[source] QuoteError),

    /// The record could not be stored and the policy requires it.
    #[error("persisting quote failed: {0}")]
    Persistence(#[from] StoreError),
}

impl ServiceError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ServiceError::Upstream(e) | ServiceError::InvalidQuote(e) => e.kind(),
            ServiceError::Persistence(e) => e.kind(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// HTTP service relaying the bid of a fixed currency pair.
#[derive(Clone)]
pub struct QuoteService {
    gateway: Arc<dyn RateGateway>,
    store: Arc<dyn QuoteStore>,
    pair: CurrencyPair,
    policy: PersistencePolicy,
}

impl QuoteService {
    /// Service for USD-BRL with best-effort persistence.
    pub fn new(gateway: Arc<dyn RateGateway>, store: Arc<dyn QuoteStore>) -> Self {
        Self {
            gateway,
            store,
            pair: CurrencyPair::USD_BRL,
            policy: PersistencePolicy::default(),
        }
    }

    /// Set how persistence failures are treated.
    pub fn with_policy(mut self, policy: PersistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch, validate and persist one quote, returning its bid.
    pub async fn current_bid(&self) -> Result<Bid, ServiceError> {
        debug!("Fetching {} from upstream", self.pair);
        let quote = self
            .gateway
            .fetch(&self.pair)
            .await
            .map_err(ServiceError::Upstream)?;
        let bid = quote.bid().map_err(ServiceError::InvalidQuote)?;

        match self.store.save(&quote).await {
            Ok(id) => debug!("Persisted {} quote as record {}", self.pair, id),
            Err(e) => match self.policy {
                PersistencePolicy::Required => return Err(e.into()),
                PersistencePolicy::BestEffort => warn!(
                    "Quote for {} not persisted ({:?}): {}",
                    self.pair,
                    e.kind(),
                    e
                ),
            },
        }
        Ok(bid)
    }

    /// Route table: `GET /cotacao`, everything else `404`.
    pub fn router(self) -> Router {
        Router::new()
            .route(QUOTE_ROUTE, get(get_bid))
            .fallback(not_found)
            .with_state(Arc::new(self))
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), QuoteError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Quote service listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Quote service stopped");
        Ok(())
    }
}

async fn get_bid(State(service): State<Arc<QuoteService>>) -> Result<Json<Bid>, ServiceError> {
    match service.current_bid().await {
        Ok(bid) => {
            info!("Relaying {} bid {}", service.pair, bid);
            Ok(Json(bid))
        }
        Err(e) => {
            error!("Request for {} failed ({:?}): {}", service.pair, e.kind(), e);
            Err(e)
        }
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
