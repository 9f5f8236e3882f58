// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use clubs_core::common::{default_credential_store, default_roster_store};
use clubs_core::domains::activities::{PgRosterStore, RosterEngine, RosterStore};
use clubs_core::domains::auth::{CredentialStore, PgCredentialStore, SessionAuthenticator};
use clubs_core::kernel::{start_session_sweeper, SESSION_SWEEP_INTERVAL};
use clubs_core::{server::build_app, server::AxumAppState, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,clubs_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mergington High School API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let (roster_store, credentials): (Arc<dyn RosterStore>, Arc<dyn CredentialStore>) =
        match &config.database_url {
            Some(database_url) => {
                tracing::info!("Connecting to database...");
                let pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .connect(database_url)
                    .await
                    .context("Failed to connect to database")?;
                tracing::info!("Database connected");

                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to run migrations")?;
                tracing::info!("Migrations complete");

                (
                    Arc::new(PgRosterStore::new(pool.clone())) as Arc<dyn RosterStore>,
                    Arc::new(PgCredentialStore::new(pool)) as Arc<dyn CredentialStore>,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory stores with default data");
                let credentials = default_credential_store()
                    .context("Failed to build default accounts")?;
                (
                    Arc::new(default_roster_store()) as Arc<dyn RosterStore>,
                    Arc::new(credentials) as Arc<dyn CredentialStore>,
                )
            }
        };

    let roster = Arc::new(
        RosterEngine::load(roster_store)
            .await
            .context("Failed to load activity catalog")?,
    );
    let auth = Arc::new(SessionAuthenticator::new(credentials, config.session_ttl));

    start_session_sweeper(auth.clone(), SESSION_SWEEP_INTERVAL);

    // Build application
    let app = build_app(AxumAppState { roster, auth }, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Activities: http://localhost:{}/activities", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
