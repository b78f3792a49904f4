//! Mock market content: neither endpoint touches state or upstream.

use axum::Json;
use shared_http::api::{SentimentResponse, WisdomResponse};
use tracker::services::{sentiment, wisdom};

/// GET /api/sentiment
pub async fn get_sentiment() -> Json<SentimentResponse> {
    Json(sentiment().into())
}

/// GET /api/wisdom
pub async fn get_wisdom() -> Json<WisdomResponse> {
    Json(wisdom().into())
}
