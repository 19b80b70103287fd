//! Query execution and materialization tests against a live database.

use super::get_test_client;
use db_console::db::{materialize, DatabaseClient};

#[tokio::test]
async fn test_simple_select_grid() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let source = client
        .run_query("SELECT 1 as num, 'hello' as greeting")
        .await
        .unwrap();
    let grid = materialize(source, 50).await.unwrap();

    assert_eq!(grid.header, vec!["Row", "num", "greeting"]);
    assert_eq!(
        grid.rows,
        vec![vec![
            "1".to_string(),
            "1".to_string(),
            "hello".to_string()
        ]]
    );

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_row_limit_bounds_drain() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    // 10 available rows, limit 2: exactly one row survives
    let source = client
        .run_query("SELECT generate_series(1, 10) AS n")
        .await
        .unwrap();
    let grid = materialize(source, 2).await.unwrap();
    assert_eq!(grid.rows.len(), 1);
    assert_eq!(grid.rows[0], vec!["1".to_string(), "1".to_string()]);

    // limit 5: four rows with gapless ordinals
    let source = client
        .run_query("SELECT generate_series(1, 10) AS n")
        .await
        .unwrap();
    let grid = materialize(source, 5).await.unwrap();
    assert_eq!(grid.rows.len(), 4);
    for (i, row) in grid.rows.iter().enumerate() {
        assert_eq!(row[0], (i + 1).to_string());
    }

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_zero_row_query_keeps_header() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let source = client
        .run_query("SELECT 1 AS a, 'x' AS b WHERE false")
        .await
        .unwrap();
    let grid = materialize(source, 50).await.unwrap();

    assert_eq!(grid.header, vec!["Row", "a", "b"]);
    assert!(grid.rows.is_empty());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_value_kinds_normalize_to_strings() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let source = client
        .run_query(
            "SELECT 7::int2 AS small, 1.5::float8 AS f, true AS b, \
             'text' AS t, NULL::int AS missing, \
             '2024-03-01'::date AS d, '\\xdeadbeef'::bytea AS raw, \
             '12.34'::numeric AS dec",
        )
        .await
        .unwrap();
    let grid = materialize(source, 50).await.unwrap();

    assert_eq!(grid.rows.len(), 1);
    let row = &grid.rows[0];
    assert_eq!(row[1], "7");
    assert_eq!(row[2], "1.5");
    assert_eq!(row[3], "true");
    assert_eq!(row[4], "text");
    assert_eq!(row[5], "NULL");
    assert_eq!(row[6], "2024-03-01");
    assert_eq!(row[7], "<4 bytes>");
    assert_eq!(row[8], "12.34");

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_invalid_query_reports_database_error() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client.run_query("SELEC * FROM nowhere").await;

    let error = result.err().expect("invalid SQL must error");
    assert!(error.to_string().to_lowercase().contains("syntax"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_identical_reruns_produce_identical_grids() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let sql = "SELECT generate_series(1, 3) AS n, 'fixed' AS label";

    let first = materialize(client.run_query(sql).await.unwrap(), 50)
        .await
        .unwrap();
    let second = materialize(client.run_query(sql).await.unwrap(), 50)
        .await
        .unwrap();

    assert_eq!(first, second);

    client.close().await.unwrap();
}
