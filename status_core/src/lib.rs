//! Core library for the status dashboard server: process vitals, database
//! probing, status aggregation and the HTTP surface built on them.

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;

pub use crate::config::AppConfig;
pub use database::{ConnectionManager, ConnectionState, ConnectionStatus, DatabaseManager};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use health::{
    DependencyProbe, DependencyState, DependencyStatus, HealthReporter, StatusAggregator,
    StatusReport, SystemSnapshot,
};

use axum::{handler::HandlerWithoutStateExt, Router};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir};
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub port: u16,
    pub aggregator: StatusAggregator,
    pub templates_dir: PathBuf,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        reporter: HealthReporter,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        let probe = DependencyProbe::new(connection_manager);

        Self {
            app_name: "Status Dashboard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            port: config.server.port,
            aggregator: StatusAggregator::new(reporter, probe, config.database.probe_timeout()),
            templates_dir: config.templates.dir.clone(),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.templates_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::fallback::handle_not_found.into_service());

    Router::new()
        .merge(create_routes())
        .fallback_service(static_files)
        .layer(CatchPanicLayer::custom(handlers::fallback::handle_panic))
        .layer(middleware::cors_layer())
        .layer(middleware::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
