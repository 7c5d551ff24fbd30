//! Error handling for the Quill API
//!
//! `ApiError` is the single error type resolvers and HTTP handlers return.
//! It maps onto an HTTP status code via Axum's `IntoResponse` and onto a
//! GraphQL error with an `extensions.code` entry via async-graphql's
//! `ErrorExtensions`.

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::repositories::StoreError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ========== Validation Errors ==========
    /// Request validation failed
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========== Store Errors ==========
    /// The backing store rejected or failed the operation
    ///
    /// Shared so that one failed batch can be reported to every resolver
    /// that waited on it.
    #[error(transparent)]
    Store(Arc<StoreError>),

    // ========== Configuration Errors ==========
    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    // ========== Internal Errors ==========
    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Store(err) => match err.as_ref() {
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Store(err) => match err.as_ref() {
                StoreError::Conflict(_) => "CONFLICT",
                StoreError::InvalidReference(_) => "INVALID_REFERENCE",
                StoreError::Unavailable(_) => "DATABASE_UNAVAILABLE",
                StoreError::Database(_) => "DATABASE_ERROR",
            },
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to clients; server-side details stay in the logs
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(err) => match err.as_ref() {
                StoreError::Unavailable(_) => "database connection unavailable".to_string(),
                StoreError::Database(_) => "database error".to_string(),
                _ => self.to_string(),
            },
            Self::Configuration(_) | Self::Internal(_) => "internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code(),
            message: self.public_message(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        let code = self.error_code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Convert anything that becomes an [`ApiError`] into a GraphQL field error
pub fn to_graphql_error(error: impl Into<ApiError>) -> async_graphql::Error {
    error.into().extend()
}

// ========== Conversion Implementations ==========

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(Arc::new(err))
    }
}

impl From<Arc<StoreError>> for ApiError {
    fn from(err: Arc<StoreError>) -> Self {
        Self::Store(err)
    }
}

impl From<quill_shared_config::ConfigError> for ApiError {
    fn from(err: quill_shared_config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::not_found("user", "123").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation("empty name").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::Conflict("profiles_user_id_key".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(StoreError::Unavailable("pool timed out".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::not_found("post", "1").error_code(), "NOT_FOUND");
        assert_eq!(
            ApiError::from(StoreError::InvalidReference("user".into())).error_code(),
            "INVALID_REFERENCE"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::not_found("user", "abc123");
        assert_eq!(err.to_string(), "user not found: abc123");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ApiError::Internal("pool state corrupted".to_string());
        assert_eq!(err.public_message(), "internal server error");

        let err = ApiError::from(StoreError::Unavailable("10.0.0.3:5432 refused".into()));
        assert!(!err.public_message().contains("10.0.0.3"));
    }

    #[test]
    fn test_graphql_error_carries_code() {
        let err = to_graphql_error(ApiError::not_found("profile", "p1"));
        assert_eq!(err.message, "profile not found: p1");
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    }
}
