use axum::{extract::State, Json};
use shared_http::api::{HealthResponse, STATUS_HEALTHY};
use tracker::domain::now_millis;

use crate::state::AppState;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_HEALTHY.into(),
        redis: state.cache_status().await.into(),
        timestamp: now_millis(),
    })
}
