use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_http::api::ErrorResponse;
use thiserror::Error;

/// Errors a handler can answer with. Details stay in the logs; clients only
/// see the generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to fetch Bitcoin price")]
    PriceUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::PriceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
