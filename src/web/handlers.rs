//! Request handlers for the console.
//!
//! Each handler extracts the submitted SQL, runs it through the executor
//! (and, for queries, the materializer), and renders the outcome. A
//! malformed form body is rejected by the `Form` extractor with a client
//! error before any database interaction happens.

use axum::extract::State;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use tracing::info;

use super::views::{render_template, PageView};
use super::AppState;
use crate::db::materialize;

/// Form payload carrying the submitted SQL text. The text is opaque here;
/// no validation beyond framing is performed.
#[derive(Debug, Deserialize)]
pub struct SqlForm {
    pub sql: String,
}

/// Serves the blank landing page.
pub async fn index() -> Response {
    render_template(PageView::blank())
}

/// Runs a row-returning query and serves a page with the bounded result grid.
pub async fn query(State(state): State<AppState>, Form(form): Form<SqlForm>) -> Response {
    render_template(query_page(&state, form.sql).await)
}

/// Runs a row-affecting statement and serves a page with its outcome.
pub async fn execute(State(state): State<AppState>, Form(form): Form<SqlForm>) -> Response {
    render_template(execute_page(&state, form.sql).await)
}

async fn query_page(state: &AppState, sql: String) -> PageView {
    let outcome = match state.db.run_query(&sql).await {
        Ok(source) => materialize(source, state.rows_limit).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(grid) => PageView::with_grid(sql, grid),
        Err(e) => PageView::with_error(sql, &e),
    }
}

async fn execute_page(state: &AppState, sql: String) -> PageView {
    match state.db.run_statement(&sql).await {
        Ok(affected) => {
            // The page keeps the thin acknowledgment; the count goes to the log.
            info!(rows_affected = affected, "statement completed");
            PageView::acknowledged(sql)
        }
        Err(e) => PageView::with_error(sql, &e),
    }
}
