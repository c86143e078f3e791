//! Bill Analytics - API Server Binary
//!
//! This binary starts the HTTP API server for the bill analytics service.
//!
//! # Usage
//!
//! ```bash
//! # Run with environment variables
//! API_PORT=5000 DATABASE_URL=postgres://... cargo run --bin bill-analytics-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 5000)
//! * `API_DATABASE_URL` - PostgreSQL connection string (falls back to `DATABASE_URL`; required)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_REQUIRED_FIELD_POLICY` - `truthy` or `present` (default: truthy)
//! * `API_MAX_CONNECTIONS` - Database pool size (default: 10)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_billing::BillingAnalytics;
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresBillStore};
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the API server.
///
/// Loads configuration, initializes logging, connects to the store, applies
/// migrations and serves until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded or has no store connection string
/// - Database connection or migrations fail
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map(|c| c.log_level.as_str())
            .unwrap_or("info"),
    );
    let config = config.context("Failed to load configuration")?;

    let database_url = config
        .database_url()
        .context("Refusing to start without a bill store")?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        policy = %config.required_field_policy,
        "Starting Bill Analytics API Server"
    );

    tracing::info!("Connecting to database...");
    let pool = create_pool(
        DatabaseConfig::new(database_url).max_connections(config.max_connections),
    )
    .await
    .context("Failed to connect to the bill store")?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Database ready");

    let store = Arc::new(PostgresBillStore::new(pool));
    let analytics = BillingAnalytics::new(store).with_policy(config.required_field_policy);

    let app = create_router(analytics);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests are allowed to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
