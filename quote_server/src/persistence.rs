//! Append-only storage of fetched quotes in a SQLite file.
//!
//! Every `save` opens its own connection, makes sure the `currency` table exists, inserts
//! one row and drops the connection again; nothing is pooled across requests. SQLite
//! serializes concurrent writers against the same file itself.
//!
//! Only the insert statement is bounded by the storage budget. Opening the file and
//! creating the schema run before the deadline is attached. On expiry the statement is
//! interrupted through the connection's interrupt handle and the caller gets
//! `DeadlineExceeded`; the blocking task then unwinds and closes the connection.
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use quote_common::budget::STORAGE_INSERT_BUDGET;
use quote_common::{FailureKind, Operation, QuoteError};
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::model::RateQuote;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "currency.db";

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS currency (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT,
        codein TEXT,
        name TEXT,
        high TEXT,
        low TEXT,
        varBid TEXT,
        pctChange TEXT,
        bid TEXT,
        ask TEXT,
        timestamp TEXT,
        create_date TEXT
    );";

const INSERT: &str = "
    INSERT INTO currency (code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);";

const SELECT_ALL: &str = "
    SELECT id, code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date
    FROM currency ORDER BY id;";

/// Failures of the storage step.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Opening the file, creating the schema or running the insert failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The insert ran out of budget.
    #[error(transparent)]
    Deadline(#[from] QuoteError),

    /// The blocking task running the statement panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StoreError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::Deadline(e) => e.kind(),
            StoreError::Sqlite(_) | StoreError::Task(_) => FailureKind::Storage,
        }
    }
}

/// One persisted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Auto-assigned, strictly increasing row id.
    pub id: i64,
    /// The stored quote fields.
    pub quote: RateQuote,
}

/// Sink for fetched quotes.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Append one record for `quote` and return its id.
    async fn save(&self, quote: &RateQuote) -> Result<i64, StoreError>;
}

/// `QuoteStore` backed by a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    insert_budget: Duration,
}

impl SqliteStore {
    /// Store at `path` with the default insert budget.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_budget(path, STORAGE_INSERT_BUDGET)
    }

    /// Store at `path` whose inserts are bounded by `insert_budget`.
    pub fn with_budget(path: impl Into<PathBuf>, insert_budget: Duration) -> Self {
        Self {
            path: path.into(),
            insert_budget,
        }
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file (creating it if needed) and ensure the schema exists.
    pub fn open(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        // Lock waits outlast the budget so contention surfaces as a deadline.
        conn.busy_timeout(self.insert_budget * 2)?;
        create_schema(&conn)?;
        Ok(conn)
    }

    /// All persisted records, oldest first.
    pub fn records(&self) -> Result<Vec<QuoteRecord>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let rows = stmt.query_map([], |row| {
            Ok(QuoteRecord {
                id: row.get(0)?,
                quote: RateQuote {
                    code: row.get(1)?,
                    codein: row.get(2)?,
                    name: row.get(3)?,
                    high: row.get(4)?,
                    low: row.get(5)?,
                    var_bid: row.get(6)?,
                    pct_change: row.get(7)?,
                    bid: row.get(8)?,
                    ask: row.get(9)?,
                    timestamp: row.get(10)?,
                    create_date: row.get(11)?,
                },
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

/// Create the `currency` table unless it already exists.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLE)
}

fn insert(conn: &Connection, quote: &RateQuote) -> rusqlite::Result<i64> {
    conn.execute(
        INSERT,
        params![
            quote.code,
            quote.codein,
            quote.name,
            quote.high,
            quote.low,
            quote.var_bid,
            quote.pct_change,
            quote.bid,
            quote.ask,
            quote.timestamp,
            quote.create_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[async_trait]
impl QuoteStore for SqliteStore {
    async fn save(&self, quote: &RateQuote) -> Result<i64, StoreError> {
        let store = self.clone();
        let conn = tokio::task::spawn_blocking(move || store.open()).await??;
        let interrupt = conn.get_interrupt_handle();

        let quote = quote.clone();
        let budget = self.insert_budget;
        let statement = tokio::task::spawn_blocking(move || insert(&conn, &quote));
        match tokio::time::timeout(budget, statement).await {
            Ok(joined) => {
                let id = joined??;
                debug!("Stored quote record {} in {}", id, self.path.display());
                Ok(id)
            }
            Err(_) => {
                interrupt.interrupt();
                Err(QuoteError::deadline(Operation::StorageInsert, budget).into())
            }
        }
    }
}
