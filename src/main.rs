mod api_doc;
mod app;
mod client_config;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod pages;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use config::Config;
use db::Database;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let default_filter = if config.debug {
        "accounting_service=debug,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("accounting-service starting");
    config.log_startup();

    let db = Database::from_config(&config).await?;
    db.health_check().await?;
    tracing::info!("Database health check passed");

    let listener = app::bind_listener(&config.service_host, config.service_port).await?;
    let addr = listener.local_addr().context("Failed to read listening address")?;

    let state = AppState {
        db,
        config: Arc::new(config),
    };
    let app = app::build_app_router(state)?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("accounting-service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
