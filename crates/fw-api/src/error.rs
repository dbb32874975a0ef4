//! API error handling
//!
//! Every response carries the uniform `{status, message, ...}` envelope.
//! Domain failures (not found, validation, conflict) answer 200 with an
//! error envelope, matching the portal's AJAX contract; only transport
//! failures use 5xx.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fw_services::ServiceError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::Storage(msg) => {
                tracing::error!("storage failure: {}", msg);
                ApiError::Internal("Something went wrong, please try again.".to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    status: &'static str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorEnvelope {
            status: "error",
            message: self.message(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_mapping() {
        let err: ApiError = ServiceError::NotFound("gone".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = ServiceError::Storage("pool closed".to_string()).into();
        match err {
            ApiError::Internal(msg) => assert!(!msg.contains("pool")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_domain_errors_answer_200() {
        let err = ApiError::Validation("Please select at least one feminine.".to_string());
        assert_eq!(err.status_code(), StatusCode::OK);

        let err = ApiError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
