/*
 * Responsibility
 * - Application-wide AppError definition
 * - IntoResponse implementation (HTTP status / JSON error body)
 * - Unified conversion from component errors (credential layer)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::credentials::CredentialError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid invocation: {0}")]
    BadRequest(String),

    /// Without resolved credentials there is no well-formed challenge to
    /// issue, so this is an invocation failure, never a 401.
    #[error("credential source unavailable")]
    CredentialUnavailable,

    #[error("invocation timed out")]
    InvocationTimeout,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::CredentialUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CREDENTIAL_UNAVAILABLE")
            }
            AppError::InvocationTimeout => (StatusCode::GATEWAY_TIMEOUT, "INVOCATION_TIMEOUT"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CredentialError> for AppError {
    fn from(_: CredentialError) -> Self {
        AppError::CredentialUnavailable
    }
}
