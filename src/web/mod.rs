//! Web interface for the console.
//!
//! A small axum surface: the landing page, a query endpoint, and an execute
//! endpoint, all rendering the same page template. The database client and
//! row limit are bound into [`AppState`] once at startup and shared by every
//! request.

pub mod handlers;
pub mod views;

use crate::db::DatabaseClient;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Shared per-process state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The pooled database connection object.
    pub db: Arc<dyn DatabaseClient>,

    /// Maximum number of data rows materialized per query.
    pub rows_limit: usize,
}

impl AppState {
    /// Binds a database client and row limit into handler state.
    pub fn new(db: Arc<dyn DatabaseClient>, rows_limit: usize) -> Self {
        Self { db, rows_limit }
    }
}

/// Builds the console router.
///
/// Routes:
/// - `GET  /` and `GET /index.html` - blank landing page
/// - `POST /query` - run SQL expecting a result grid
/// - `POST /execute` - run SQL expecting no rows
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/query", post(handlers::query))
        .route("/execute", post(handlers::execute))
        .with_state(state)
}
