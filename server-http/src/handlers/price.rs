use axum::{extract::State, Json};
use shared_http::api::PriceResponse;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/price
pub async fn get_price(State(state): State<AppState>) -> ApiResult<Json<PriceResponse>> {
    match state.price_service.get_price().await {
        Ok(quote) => Ok(Json(quote.into())),
        Err(e) => {
            error!("Error fetching price: {}", e);
            Err(ApiError::PriceUnavailable)
        }
    }
}
