//! Application error type mapping to HTTP status codes and envelope format.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request body is not valid JSON for the endpoint.
    InvalidBody(JsonRejection),
    /// The body parsed but a field is unacceptable.
    Validation(String),
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::InvalidBody(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InvalidBody(rejection) => rejection.body_text(),
            AppError::Validation(msg) => msg.clone(),
        };
        ApiResponse::error("VALIDATION_ERROR", &message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("message must not be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
