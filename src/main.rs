use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use agenda_portal_api::config;
use agenda_portal_api::database::{DatabaseManager, PgAgendaStore};
use agenda_portal_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Agenda Portal API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every request will be treated as anonymous");
    }
    if config.security.anonymous_read {
        tracing::warn!("anonymous_read is enabled; requests without a profile see unscoped data");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    let store = Arc::new(PgAgendaStore::new(pool).with_sql_logging(config.filter.debug_logging));

    let state = AppState::from_config(store, config);
    let cors = config.security.enable_cors.then_some(config.security.cors_origins.as_slice());
    let app = app(state, cors, config.api.enable_request_logging);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Agenda Portal API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
