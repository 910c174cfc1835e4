//! Requester → quote service → stub pricing API → SQLite, all over real sockets.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use quote_client::{QuoteRequester, fetch_and_record};
use quote_common::budget::{REQUESTER_BUDGET, UPSTREAM_BUDGET};
use quote_common::{FailureKind, Operation, QuoteError};
use quote_server::{HttpGateway, QuoteService, SqliteStore};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Looser than production so a cold temp file cannot trip the insert deadline.
const INSERT_BUDGET: Duration = Duration::from_millis(100);

const USD_BRL: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4612","low":"5.4101","varBid":"0.0123","pctChange":"0.23","bid":"5.43","ask":"5.4312","timestamp":"1718040000","create_date":"2024-06-10 14:20:00"}}"#;

async fn spawn_upstream(body: &'static str, delay: Duration) -> String {
    let app = Router::new().route(
        "/json/last/USD-BRL",
        get(move || async move {
            tokio::time::sleep(delay).await;
            body
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}/json/last/", addr)
}

struct Deployment {
    requester: QuoteRequester,
    store: SqliteStore,
    output: PathBuf,
    _dir: TempDir,
}

async fn deploy(upstream_url: String, upstream_budget: Duration) -> Deployment {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::with_budget(dir.path().join("currency.db"), INSERT_BUDGET);
    let gateway = HttpGateway::with_base_url(upstream_url, upstream_budget).unwrap();
    let service = QuoteService::new(Arc::new(gateway), Arc::new(store.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(service.serve(listener, std::future::pending()));

    let requester =
        QuoteRequester::with_url(format!("http://{}/cotacao", addr), REQUESTER_BUDGET).unwrap();
    Deployment {
        requester,
        store,
        output: dir.path().join("cotacao.txt"),
        _dir: dir,
    }
}

#[tokio::test]
async fn bid_flows_from_upstream_to_database_and_output_file() {
    let deployment = deploy(spawn_upstream(USD_BRL, Duration::ZERO).await, UPSTREAM_BUDGET).await;

    let bid = fetch_and_record(&deployment.requester, &deployment.output)
        .await
        .unwrap();
    assert_eq!(bid.as_str(), "5.43");
    assert_eq!(std::fs::read(&deployment.output).unwrap(), b"5.43");

    let records = deployment.store.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quote.bid, "5.43");
    assert_eq!(records[0].quote.codein, "BRL");
}

#[tokio::test]
async fn empty_bid_writes_neither_row_nor_file() {
    let deployment = deploy(
        spawn_upstream(r#"{"USDBRL":{"bid":""}}"#, Duration::ZERO).await,
        UPSTREAM_BUDGET,
    )
    .await;

    let err = fetch_and_record(&deployment.requester, &deployment.output)
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteError::UnexpectedStatus(500)));
    assert!(!deployment.output.exists());
    assert!(deployment.store.records().unwrap().is_empty());
}

#[tokio::test]
async fn slow_upstream_surfaces_as_server_error_within_requester_budget() {
    let deployment = deploy(
        spawn_upstream(USD_BRL, Duration::from_millis(600)).await,
        UPSTREAM_BUDGET,
    )
    .await;

    let err = fetch_and_record(&deployment.requester, &deployment.output)
        .await
        .unwrap_err();
    assert!(matches!(err, QuoteError::UnexpectedStatus(500)));
    assert!(!deployment.output.exists());
}

#[tokio::test]
async fn service_slower_than_requester_budget_writes_nothing() {
    // The service is allowed to wait longer than the requester will.
    let deployment = deploy(
        spawn_upstream(USD_BRL, Duration::from_millis(500)).await,
        Duration::from_secs(2),
    )
    .await;

    let started = std::time::Instant::now();
    let err = fetch_and_record(&deployment.requester, &deployment.output)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::DeadlineExceeded);
    assert!(matches!(
        err,
        QuoteError::DeadlineExceeded { operation: Operation::QuoteRequest, .. }
    ));
    assert!(started.elapsed() < Duration::from_millis(450));
    assert!(!deployment.output.exists());
}

#[tokio::test]
async fn unreachable_service_writes_nothing() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("cotacao.txt");

    let requester =
        QuoteRequester::with_url(format!("http://{}/cotacao", addr), REQUESTER_BUDGET).unwrap();
    let err = fetch_and_record(&requester, &output).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(!output.exists());
}
