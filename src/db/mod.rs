//! Database abstraction layer for the console.
//!
//! Provides a trait-based interface for database operations, allowing
//! different database backends to be used interchangeably.

pub mod grid;
mod mock;
mod postgres;
mod types;

pub use grid::{materialize, ResultGrid};
pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use postgres::PostgresClient;
pub use types::{RowSource, RowStream, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    // Future: MySQL, SQLite, etc.
}

impl DatabaseBackend {
    /// Returns the backend as a string for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
        }
    }

    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Creates a database client for the given backend and configuration.
///
/// This is the central factory function for database connections. The
/// returned client is the only process-wide shared state; it is created once
/// at startup and reused across all requests.
pub async fn connect(config: &ConnectionConfig) -> Result<Arc<dyn DatabaseClient>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let client = PostgresClient::connect(config).await?;
            Ok(Arc::new(client))
        }
    }
}

/// Trait defining the interface for database clients.
///
/// The two entry points mirror the console's submission paths: `run_query`
/// expects tabular output and hands back a live row source; `run_statement`
/// expects none and reports the affected-row count. Neither inspects the SQL
/// text; a mismatched submission is handled by whichever path was invoked and
/// the database decides whether it errors.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Opens a client for the given connection configuration.
    async fn connect(config: &ConnectionConfig) -> Result<Self>
    where
        Self: Sized;

    /// Issues SQL expecting tabular output and returns a live row source.
    async fn run_query<'a>(&'a self, sql: &'a str) -> Result<RowSource<'a>>;

    /// Issues SQL expecting no tabular output; returns the affected-row count.
    async fn run_statement(&self, sql: &str) -> Result<u64>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
