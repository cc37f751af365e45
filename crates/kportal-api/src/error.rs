//! HTTP error mapping.
//!
//! Every failure is rendered as `{ "message": <reason phrase>, "detail": <text> }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

/// Detail returned for store failures; the underlying error is only logged.
pub const INTERNAL_ERROR_DETAIL: &str = "An unexpected error occurred";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// HTTP reason phrase, e.g. `Bad Request`.
    pub message: String,
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Failure whose message is safe to return to the client.
    Internal(String),
    /// Store or other unexpected failure; detail is replaced by a generic text.
    Unexpected(kportal_core::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => {
                msg.clone()
            }
            ApiError::Unexpected(_) => INTERNAL_ERROR_DETAIL.to_string(),
        }
    }
}

impl From<kportal_core::Error> for ApiError {
    fn from(err: kportal_core::Error) -> Self {
        match err {
            kportal_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            kportal_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            kportal_core::Error::Internal(msg) => ApiError::Internal(msg),
            other => ApiError::Unexpected(other),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(errors.detail())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            ApiError::Unexpected(err) => {
                tracing::error!(subsystem = "api", error = %err, "Request failed");
            }
            ApiError::Internal(msg) => {
                tracing::error!(subsystem = "api", detail = %msg, "Request failed");
            }
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                tracing::debug!(
                    subsystem = "api",
                    status = status.as_u16(),
                    detail = %msg,
                    "Request rejected"
                );
            }
        }

        let body = Json(ErrorBody {
            message: status.canonical_reason().unwrap_or("Error").to_string(),
            detail,
        });

        (status, body).into_response()
    }
}
