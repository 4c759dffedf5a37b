//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::assessment::AssessmentServiceError;
use crate::service::identity::IdentityError;
use crate::service::scoring::InvalidInputError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Malformed assessment field (400)
    #[error("{0}")]
    InvalidInput(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing, invalid or expired credentials (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Resource already exists (409)
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::debug!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API request rejected"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<InvalidInputError> for ApiError {
    fn from(err: InvalidInputError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<AssessmentServiceError> for ApiError {
    fn from(err: AssessmentServiceError) -> Self {
        match err {
            AssessmentServiceError::InvalidInput(e) => e.into(),
            AssessmentServiceError::History(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MissingFields | IdentityError::InvalidEmail | IdentityError::WeakPassword => {
                ApiError::BadRequest(err.to_string())
            }
            IdentityError::UserExists => ApiError::Conflict(err.to_string()),
            IdentityError::InvalidCredentials
            | IdentityError::MissingToken
            | IdentityError::InvalidToken
            | IdentityError::TokenExpired
            | IdentityError::UserNotFound => ApiError::Unauthorized(err.to_string()),
            IdentityError::Storage(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid: ApiError = InvalidInputError::new("age", "expected a whole number").into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let duplicate: ApiError = IdentityError::UserExists.into();
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

        let expired: ApiError = IdentityError::TokenExpired.into();
        assert_eq!(expired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(expired.to_string(), "Token has expired");

        let weak: ApiError = IdentityError::WeakPassword.into();
        assert_eq!(weak.status_code(), StatusCode::BAD_REQUEST);

        let storage: ApiError = IdentityError::Storage("pool timed out".to_string()).into();
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
