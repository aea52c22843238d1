//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedash_domain::error::{HomeDashError, NotFoundError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeDashError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HomeDashError);

impl From<HomeDashError> for ApiError {
    fn from(err: HomeDashError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<NotFoundError> for ApiError {
    fn from(err: NotFoundError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HomeDashError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HomeDashError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HomeDashError::NotLoaded => (StatusCode::SERVICE_UNAVAILABLE, self.0.to_string()),
            HomeDashError::Transport(err) => {
                tracing::error!(error = %err, "transport error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
