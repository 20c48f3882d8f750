//! JSON status endpoints

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::{
    error::{AppError, Result},
    models::{DatabasePayload, StatusPayload},
    AppState,
};

pub async fn handle_api_status(State(state): State<AppState>) -> Json<StatusPayload> {
    info!("GET /api/status - Checking API status");

    let report = state.aggregator.build_report().await;
    Json(StatusPayload::from_report(&report, state.port))
}

pub async fn handle_api_database(State(state): State<AppState>) -> Result<Json<DatabasePayload>> {
    info!("GET /api/database - Checking database status");

    let probe = state.aggregator.probe().clone();
    let timeout = state.aggregator.probe_timeout();

    // The probe is bounded by its timeout, so the task always finishes.
    let payload = tokio::spawn(async move {
        let dependency = probe.check(timeout).await;
        DatabasePayload::new(probe.current_state(), &dependency)
    })
    .await
    .map_err(|e| {
        error!("Database status task failed: {}", e);
        AppError::DatabaseCheck("the database check did not complete".to_string())
    })?;

    Ok(Json(payload))
}
