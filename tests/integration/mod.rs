//! Live-database integration tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable to run them.

pub mod query_test;
pub mod statement_test;

use db_console::config::ConnectionConfig;
use db_console::db::{DatabaseClient, PostgresClient};

/// Helper to create a test client, or None when DATABASE_URL is unset.
pub async fn get_test_client() -> Option<PostgresClient> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    PostgresClient::connect(&config).await.ok()
}
