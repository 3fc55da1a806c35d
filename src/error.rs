use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::PriceOutOfRange;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Pizza or Restaurant not found")]
    PizzaOrRestaurantNotFound,
    #[error("Missing data")]
    MissingData,
    #[error("validation errors")]
    Validation(#[from] PriceOutOfRange),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::result::ConnectionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::RestaurantNotFound | ApiError::PizzaOrRestaurantNotFound => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            ApiError::MissingData => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            // Validation failures report a list, everything else a single message.
            ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": [self.to_string()] }))
            }
            ApiError::Database(_) | ApiError::Connection(_) => {
                tracing::error!("internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
