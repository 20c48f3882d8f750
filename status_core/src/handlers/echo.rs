use axum::Json;
use tracing::info;

use crate::{
    error::timestamp_now,
    extractors::JsonOrForm,
    models::EchoResponse,
};

pub async fn handle_api_test(
    JsonOrForm(body): JsonOrForm<serde_json::Value>,
) -> Json<EchoResponse> {
    info!("POST /api/test - received: {}", body);

    Json(EchoResponse {
        message: "POST test executed successfully".to_string(),
        received_data: body,
        timestamp: timestamp_now(),
    })
}
