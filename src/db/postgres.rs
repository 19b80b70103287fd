//! PostgreSQL client implementation.
//!
//! Provides the `PostgresClient` struct that implements the `DatabaseClient`
//! trait for PostgreSQL databases using sqlx.

use crate::config::ConnectionConfig;
use crate::db::{DatabaseClient, RowSource, Value};
use crate::error::{ConsoleError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column as SqlxColumn, Executor, Row as SqlxRow, Statement, TypeInfo};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Maximum number of connection retry attempts.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// PostgreSQL database client.
#[derive(Debug)]
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Creates a new PostgresClient from an existing connection pool.
    ///
    /// This is primarily useful for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let conn_str = config.to_connection_string()?;

        let mut last_error = None;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {}", attempt, MAX_RETRY_ATTEMPTS);

            let result = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(10))
                .connect(&conn_str)
                .await;

            match result {
                Ok(pool) => {
                    debug!("Successfully connected to database");
                    return Ok(Self { pool });
                }
                Err(e) => {
                    let is_transient = is_transient_error(&e);
                    last_error = Some(e);

                    if attempt < MAX_RETRY_ATTEMPTS && is_transient {
                        warn!(
                            "Connection attempt {} failed (transient error), retrying in {:?}",
                            attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2; // Exponential backoff
                    }
                }
            }
        }

        // All retries exhausted
        Err(map_connection_error(
            last_error.expect("at least one attempt was made"),
            config,
        ))
    }

    async fn run_query<'a>(&'a self, sql: &'a str) -> Result<RowSource<'a>> {
        info!("querying: {sql}");

        // Preparing classifies database-reported failures (bad syntax,
        // unknown relations, permissions) up front and describes the result
        // columns even when no rows will come back.
        let statement = self
            .pool
            .prepare(sql)
            .await
            .map_err(|e| ConsoleError::query(format_query_error(e)))?;

        let columns = statement
            .columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect();

        let rows = sqlx::query(sql)
            .fetch(&self.pool)
            .map(|item| match item {
                Ok(row) => convert_row(&row),
                Err(e) => Err(ConsoleError::query(format_query_error(e))),
            })
            .boxed();

        Ok(RowSource { columns, rows })
    }

    async fn run_statement(&self, sql: &str) -> Result<u64> {
        info!("executing: {sql}");

        let done = sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| ConsoleError::query(format_query_error(e)))?;

        Ok(done.rows_affected())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Converts a sqlx PgRow to decoded values, one per column.
fn convert_row(row: &PgRow) -> Result<Vec<Value>> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Decodes one nullable column, surfacing driver decode failures.
fn decode<'r, T>(row: &'r PgRow, index: usize) -> Result<Option<T>>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get::<Option<T>, _>(index)
        .map_err(|e| ConsoleError::query(format!("column {index}: {e}")))
}

/// Converts a single column value from a PgRow to our Value type.
///
/// The column type is only known at runtime, so this matches on the reported
/// type name and decodes accordingly. SQL NULL becomes `Value::Null` for
/// every kind; a value the driver cannot decode is an error, which fails the
/// whole materialization rather than misrepresenting the data.
fn convert_value(row: &PgRow, index: usize, type_name: &str) -> Result<Value> {
    let value = match type_name.to_uppercase().as_str() {
        "BOOL" | "BOOLEAN" => decode::<bool>(row, index)?.map(Value::Bool),

        "INT2" | "SMALLINT" => decode::<i16>(row, index)?.map(|v| Value::Int(v as i64)),

        "INT4" | "INT" | "INTEGER" => decode::<i32>(row, index)?.map(|v| Value::Int(v as i64)),

        "INT8" | "BIGINT" => decode::<i64>(row, index)?.map(Value::Int),

        "FLOAT4" | "REAL" => decode::<f32>(row, index)?.map(|v| Value::Float(v as f64)),

        "FLOAT8" | "DOUBLE PRECISION" => decode::<f64>(row, index)?.map(Value::Float),

        "NUMERIC" | "DECIMAL" => {
            decode::<rust_decimal::Decimal>(row, index)?.map(|v| Value::String(v.to_string()))
        }

        "BYTEA" => decode::<Vec<u8>>(row, index)?.map(Value::Bytes),

        "UUID" => decode::<uuid::Uuid>(row, index)?.map(|v| Value::String(v.to_string())),

        "DATE" => decode::<chrono::NaiveDate>(row, index)?.map(Value::Date),

        "TIME" => decode::<chrono::NaiveTime>(row, index)?.map(Value::Time),

        "TIMESTAMP" => decode::<chrono::NaiveDateTime>(row, index)?.map(Value::Timestamp),

        "TIMESTAMPTZ" => {
            decode::<chrono::DateTime<chrono::Utc>>(row, index)?.map(Value::TimestampTz)
        }

        "JSON" | "JSONB" => {
            decode::<serde_json::Value>(row, index)?.map(|v| Value::String(v.to_string()))
        }

        // For all other types, try to get as string
        _ => decode::<String>(row, index)?.map(Value::String),
    };

    Ok(value.unwrap_or(Value::Null))
}

/// Determines if an error is transient and worth retrying.
fn is_transient_error(error: &sqlx::Error) -> bool {
    let error_str = error.to_string().to_lowercase();

    // Connection refused or timeout are often transient
    if error_str.contains("connection refused")
        || error_str.contains("timed out")
        || error_str.contains("timeout")
        || error_str.contains("temporarily unavailable")
        || error_str.contains("connection reset")
        || error_str.contains("broken pipe")
    {
        return true;
    }

    // Authentication and database-not-found errors are not transient
    if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
        || error_str.contains("does not exist")
        || error_str.contains("ssl")
        || error_str.contains("tls")
    {
        return false;
    }

    // Default to not retrying unknown errors
    false
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> ConsoleError {
    let host = config.host.as_deref().unwrap_or("localhost");
    let port = config.port;
    let user = config.user.as_deref().unwrap_or("unknown");
    let database = config.database.as_deref().unwrap_or("unknown");

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") || error_str.contains("could not connect") {
        ConsoleError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
    {
        ConsoleError::connection(format!(
            "Authentication failed for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("does not exist") && error_str.contains("database") {
        ConsoleError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("ssl") || error_str.contains("tls") {
        ConsoleError::connection(
            "Server requires SSL. Add '?sslmode=require' to connection string.".to_string(),
        )
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        ConsoleError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        ConsoleError::connection(error.to_string())
    }
}

/// Formats a query error with hints if available.
fn format_query_error(error: sqlx::Error) -> String {
    let error_str = error.to_string();

    // Parse PostgreSQL error format to extract useful information
    // PostgreSQL errors often have format: "ERROR: message\nDETAIL: ...\nHINT: ..."
    let mut result = String::new();

    // Extract the main error message
    if let Some(db_error) = error.as_database_error() {
        result.push_str("ERROR: ");
        result.push_str(db_error.message());

        // Try to downcast to PgDatabaseError for Postgres-specific fields
        if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
            // Add detail if available
            if let Some(detail) = pg_error.detail() {
                result.push_str("\n  DETAIL: ");
                result.push_str(detail);
            }

            // Add hint if available
            if let Some(hint) = pg_error.hint() {
                result.push_str("\n  HINT: ");
                result.push_str(hint);
            }

            // Add position/context if available
            if let Some(table) = pg_error.table() {
                result.push_str("\n  TABLE: ");
                result.push_str(table);
            }

            if let Some(column) = pg_error.column() {
                result.push_str("\n  COLUMN: ");
                result.push_str(column);
            }

            if let Some(constraint) = pg_error.constraint() {
                result.push_str("\n  CONSTRAINT: ");
                result.push_str(constraint);
            }
        }
    } else {
        // Fallback for non-database errors
        result = error_str;
    }

    result
}
