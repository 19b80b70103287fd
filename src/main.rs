//! db-console - a minimal web console for running SQL against a configured database.

use anyhow::Context;
use db_console::cli::Cli;
use db_console::config::{Config, ConnectionConfig};
use db_console::error::{ConsoleError, Result};
use db_console::{db, logging, web};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // A .env file may carry DATABASE_URL; ignore it if absent.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let server = cli.to_server_config(&config);

    let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
        ConsoleError::config(
            "No database connection configured. \
             Pass a connection string or set DATABASE_URL; see --help for usage.",
        )
    })?;

    info!(
        "Connecting to {} ({})",
        connection.display_string(),
        connection.backend.as_str()
    );
    let db = db::connect(&connection).await?;

    let state = web::AppState::new(db, server.rows_limit);
    let router = web::build_router(state);

    let addr = format!("0.0.0.0:{}", server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        "Serving on http://{addr} (rows limit {})",
        server.rows_limit
    );
    axum::serve(listener, router)
        .await
        .context("server terminated")?;

    Ok(())
}

/// Resolves the final connection configuration with precedence:
/// CLI arguments, then the named connection, then the default connection
/// from the config file, then DATABASE_URL; PG* environment variables fill
/// remaining gaps.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    // Start with CLI connection config if provided
    let mut connection = cli.to_connection_config()?;

    // If no CLI connection, try named connection from config
    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(ConsoleError::config(format!(
                    "Connection '{name}' not found in config file"
                )));
            }
        }
    }

    // If still no connection, try default from config
    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    // Last resort: DATABASE_URL
    if connection.is_none() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            connection = Some(ConnectionConfig::from_connection_string(&url)?);
        }
    }

    // Apply environment variable defaults
    if let Some(ref mut conn) = connection {
        conn.apply_env_defaults();
    }

    Ok(connection)
}
