//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use workout_core::{ErrorResponse, WorkoutError};

/// Wraps a domain error so handlers can return it with `?`
#[derive(Debug)]
pub struct ApiError(pub WorkoutError);

impl From<WorkoutError> for ApiError {
    fn from(e: WorkoutError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            WorkoutError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            WorkoutError::EmptyEntry => StatusCode::BAD_REQUEST,
            WorkoutError::Storage(_) | WorkoutError::Config(_) => {
                tracing::error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}
