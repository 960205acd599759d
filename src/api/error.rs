//! HTTP error responses.
//!
//! Every failure leaving a handler is an [`ApiErrorResponse`]: a status code
//! plus a `{code, message, details?}` JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::orchestration::OrchestrationError;
use crate::restaurants::RepositoryError;
use crate::store::StoreError;

use super::validation::{FieldError, ValidationError};

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    /// Field-level errors, present for validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Status code plus error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    pub fn validation_error(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::validation(message, details))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiError::new("DUPLICATE_KEY", message))
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiError::new("STORE_UNAVAILABLE", message),
        )
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        Self::validation_error("Validation failed", error.errors)
    }
}

impl From<RepositoryError> for ApiErrorResponse {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Store(StoreError::Unavailable(message)) => {
                error!(%message, "Store unavailable");
                Self::unavailable("The data store is currently unavailable")
            }
            RepositoryError::Store(StoreError::DuplicateKey(key)) => {
                Self::conflict(format!("A restaurant with id {key} already exists"))
            }
            // Store internals and corrupt documents are logged, not exposed.
            other => {
                error!(error = %other, "Internal error");
                Self::internal_error("An internal error occurred")
            }
        }
    }
}

impl From<OrchestrationError> for ApiErrorResponse {
    fn from(error: OrchestrationError) -> Self {
        match error {
            OrchestrationError::NotFound(id) => Self::not_found(format!("Restaurant {id} not found")),
            OrchestrationError::Repository(inner) => inner.into(),
        }
    }
}
