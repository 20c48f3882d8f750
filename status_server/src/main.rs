//! Main entry point for the status dashboard server

use anyhow::Result;
use status_core::{
    create_app, run_server, AppConfig, AppState, ConnectionManager, DatabaseManager,
    HealthReporter,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let reporter = HealthReporter::new()
        .map_err(|e| anyhow::anyhow!("Cannot read process metrics: {}", e))?;

    let database = Arc::new(DatabaseManager::new(config.database.clone()));
    if database.connect().await {
        info!("Database: connected");
    } else {
        warn!("Database: not available, running in offline mode");
    }

    let state = AppState::new(&config, reporter, database.clone());
    info!("App: {} v{}", state.app_name, state.version);
    info!("Dashboard: http://localhost:{}", config.server.port);
    info!("API: http://localhost:{}/api/status", config.server.port);

    let app = create_app(state);

    run_server(app, addr).await?;

    database.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "status_core={level},{crate_name}={level},tower_http=debug",
                level = default_level,
                crate_name = env!("CARGO_CRATE_NAME"),
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
