//! View models for the console page.
//!
//! A single view model pairs the submitted SQL with its outcome and is
//! rendered by the askama template. Exactly one of `grid` and `error` is
//! populated for a query; a successful statement populates neither.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::db::ResultGrid;
use crate::error::ConsoleError;

/// The console page: SQL input, optional error, optional result table.
#[derive(Template)]
#[template(path = "index.html")]
pub struct PageView {
    /// The SQL text as submitted, echoed back into the form.
    pub sql: String,

    /// Materialized result grid, for successful queries.
    pub grid: Option<ResultGrid>,

    /// Error text, for failed queries and statements.
    pub error: Option<String>,
}

impl PageView {
    /// Blank landing page.
    pub fn blank() -> Self {
        Self {
            sql: String::new(),
            grid: None,
            error: None,
        }
    }

    /// Page for a successful query.
    pub fn with_grid(sql: String, grid: ResultGrid) -> Self {
        Self {
            sql,
            grid: Some(grid),
            error: None,
        }
    }

    /// Page for a failed query or statement; the submitted text is preserved
    /// so the operator can see what was run.
    pub fn with_error(sql: String, error: &ConsoleError) -> Self {
        Self {
            sql,
            grid: None,
            error: Some(error.to_string()),
        }
    }

    /// Page for a successful statement: no grid, no error.
    pub fn acknowledged(sql: String) -> Self {
        Self {
            sql,
            grid: None,
            error: None,
        }
    }
}

/// Render a template with automatic error handling.
///
/// Returns HTML on success; on render failure, logs and falls back to a
/// plain-text 500 response.
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to build page: {e}"),
            )
                .into_response()
        }
    }
}
