//! API error types with IntoResponse
//!
//! Every error renders as `{success: false, error: <status>, message}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use playbill_core::trivia::QuizError;
use playbill_core::validation::FieldErrors;

use crate::store::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body (400)
    BadRequest { reason: String },

    /// Missing row, unknown route or empty search term (404)
    NotFound,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Required body fields missing (422)
    InvalidRequest { reason: String },

    /// Field-level validation failed (422)
    Validation(FieldErrors),

    /// A write could not be applied (422, logged)
    Unprocessable { reason: String },

    /// Unexpected failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Convert a store error for handlers that answer store failures with 422.
    ///
    /// Missing rows stay 404; anything else becomes 422.
    pub fn unprocessable(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound,
            other => Self::Unprocessable {
                reason: other.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest { .. } | Self::Validation(_) | Self::Unprocessable { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = status.as_u16();

        let body = match &self {
            Self::BadRequest { reason } => {
                tracing::debug!(%reason, "bad request");
                json!({ "success": false, "error": code, "message": "bad request" })
            }
            Self::NotFound => {
                json!({ "success": false, "error": code, "message": "resource not found" })
            }
            Self::MethodNotAllowed => {
                json!({ "success": false, "error": code, "message": "method not allowed" })
            }
            Self::InvalidRequest { reason } => json!({
                "success": false,
                "error": code,
                "message": "unprocessable",
                "reason": reason
            }),
            Self::Validation(errors) => json!({
                "success": false,
                "error": code,
                "message": "unprocessable",
                "errors": errors
            }),
            Self::Unprocessable { reason } => {
                tracing::warn!(%reason, "write rejected");
                json!({ "success": false, "error": code, "message": "unprocessable" })
            }
            Self::Internal { message } => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", message);
                json!({ "success": false, "error": code, "message": "internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::UnknownReference { .. } => Self::Unprocessable {
                reason: e.to_string(),
            },
            StoreError::Sqlx(_) => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(e: FieldErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<QuizError> for ApiError {
    fn from(e: QuizError) -> Self {
        Self::InvalidRequest {
            reason: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape
            JsonRejection::JsonDataError(e) => Self::InvalidRequest {
                reason: e.body_text(),
            },
            other => Self::BadRequest {
                reason: other.body_text(),
            },
        }
    }
}
