// JSON error responses for HTTP handlers
use crate::application::error::ServiceError;
use crate::domain::error::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Handler error. Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] ServiceError);

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::PlantNotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ServiceError::Analytics(AnalyticsError::InsufficientData) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
            }
            ServiceError::Analytics(AnalyticsError::ConfigurationMissing) => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }
            ServiceError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ServiceError::Repository(err) => {
                tracing::error!("Repository failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
