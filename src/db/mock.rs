//! Mock database clients for testing.
//!
//! Provide in-memory implementations of `DatabaseClient` so handlers and the
//! materializer can be exercised without a running database.

use super::{DatabaseClient, RowSource, Value};
use crate::config::ConnectionConfig;
use crate::error::{ConsoleError, Result};
use async_trait::async_trait;
use futures::StreamExt;

/// A mock database client that returns predefined results.
#[derive(Debug, Clone, Default)]
pub struct MockDatabaseClient {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    fail_after: Option<String>,
    rows_affected: u64,
}

impl MockDatabaseClient {
    /// Creates a mock client whose queries return an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client whose queries return the given columns and rows.
    pub fn with_rows(columns: Vec<&str>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: columns.into_iter().map(String::from).collect(),
            rows,
            ..Self::default()
        }
    }

    /// Makes the row stream fail with the given message after all configured
    /// rows have been yielded.
    pub fn fail_rows_with(mut self, message: impl Into<String>) -> Self {
        self.fail_after = Some(message.into());
        self
    }

    /// Sets the affected-row count reported for statements.
    pub fn with_rows_affected(mut self, count: u64) -> Self {
        self.rows_affected = count;
        self
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn connect(_config: &ConnectionConfig) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(Self::new())
    }

    async fn run_query<'a>(&'a self, _sql: &'a str) -> Result<RowSource<'a>> {
        let mut items: Vec<Result<Vec<Value>>> =
            self.rows.iter().cloned().map(Ok).collect();
        if let Some(message) = &self.fail_after {
            items.push(Err(ConsoleError::query(message.clone())));
        }

        Ok(RowSource {
            columns: self.columns.clone(),
            rows: futures::stream::iter(items).boxed(),
        })
    }

    async fn run_statement(&self, _sql: &str) -> Result<u64> {
        Ok(self.rows_affected)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A mock database client that fails every operation.
#[derive(Debug, Clone)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a client whose every operation fails with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn connect(_config: &ConnectionConfig) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(Self::new("connection is down"))
    }

    async fn run_query<'a>(&'a self, _sql: &'a str) -> Result<RowSource<'a>> {
        Err(ConsoleError::query(self.message.clone()))
    }

    async fn run_statement(&self, _sql: &str) -> Result<u64> {
        Err(ConsoleError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
