//! Statement execution tests against a live database.

use super::get_test_client;
use db_console::db::{materialize, DatabaseClient};

#[tokio::test]
async fn test_statement_reports_affected_rows() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    client
        .run_statement("DROP TABLE IF EXISTS dbconsole_affected_test")
        .await
        .unwrap();
    client
        .run_statement("CREATE TABLE dbconsole_affected_test (id int, name text)")
        .await
        .unwrap();

    let inserted = client
        .run_statement(
            "INSERT INTO dbconsole_affected_test (id, name) VALUES (1, 'a'), (2, 'b')",
        )
        .await
        .unwrap();
    assert_eq!(inserted, 2);

    let updated = client
        .run_statement("UPDATE dbconsole_affected_test SET name = 'x'")
        .await
        .unwrap();
    assert_eq!(updated, 2);

    client
        .run_statement("DROP TABLE dbconsole_affected_test")
        .await
        .unwrap();

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_write_then_read_back() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    client
        .run_statement("DROP TABLE IF EXISTS dbconsole_roundtrip_test")
        .await
        .unwrap();
    client
        .run_statement("CREATE TABLE dbconsole_roundtrip_test (id int, name text)")
        .await
        .unwrap();
    client
        .run_statement("INSERT INTO dbconsole_roundtrip_test VALUES (1, 'Alice')")
        .await
        .unwrap();

    let source = client
        .run_query("SELECT id, name FROM dbconsole_roundtrip_test ORDER BY id")
        .await
        .unwrap();
    let grid = materialize(source, 50).await.unwrap();

    assert_eq!(grid.header, vec!["Row", "id", "name"]);
    assert_eq!(
        grid.rows,
        vec![vec![
            "1".to_string(),
            "1".to_string(),
            "Alice".to_string()
        ]]
    );

    client
        .run_statement("DROP TABLE dbconsole_roundtrip_test")
        .await
        .unwrap();

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_failing_statement_reports_error() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .run_statement("INSERT INTO no_such_table_anywhere VALUES (1)")
        .await;

    let error = result.err().expect("statement must error");
    assert!(error.to_string().contains("no_such_table_anywhere"));

    client.close().await.unwrap();
}
