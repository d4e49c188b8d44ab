use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use coingecko::CoinGeckoError;
use radar_db::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] CoinGeckoError),

    #[error("{0} not found")]
    NotFound(&'static str),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Store error".to_string())
            }
            ApiError::Upstream(e) => {
                tracing::error!("CoinGecko request failed: {}", e);
                (StatusCode::BAD_GATEWAY, "Upstream error".to_string())
            }
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
