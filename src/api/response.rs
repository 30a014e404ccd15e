//! Response types for the roster engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let code = match &error {
            // Config problems are server-side; the file path and parse
            // message go into the details field, not the client message.
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                return ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                };
            }
            EngineError::EmptyRoster => "EMPTY_ROSTER",
            EngineError::DuplicateEmployee { .. } => "DUPLICATE_EMPLOYEE",
            EngineError::UnknownRelief { .. } => "UNKNOWN_RELIEF",
            EngineError::NoDuties => "NO_DUTIES",
            EngineError::MultiplePeriodicDuties { .. } => "MULTIPLE_PERIODIC_DUTIES",
            EngineError::InvalidMonth { .. } => "INVALID_MONTH",
        };
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(code, error.to_string()),
        }
    }
}
