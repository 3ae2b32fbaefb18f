//! Application error types
//!
//! Unified error handling for the entire application. This is the
//! gateway-protection-layer taxonomy: every variant carries a stable
//! machine-readable code and maps to one HTTP status.

use serde::Serialize;
use std::fmt;
use tutor_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Account is inactive")]
    InactivePrincipal,

    // Authorization errors
    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported API version: {0}")]
    UnsupportedVersion(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Protection layer errors
    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    #[error("Payload too large: max {max_bytes} bytes")]
    PayloadTooLarge { max_bytes: usize },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Service temporarily unavailable: {downstream} circuit open")]
    CircuitOpen { downstream: &'static str },

    #[error("Downstream unavailable: {0}")]
    DownstreamUnavailable(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) | Self::UnsupportedVersion(_) => 400,

            // 401 Unauthorized
            Self::AuthenticationFailed | Self::MissingAuth | Self::InactivePrincipal => 401,

            // 403 Forbidden
            Self::AuthorizationFailed(_) => 403,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 413 Payload Too Large
            Self::PayloadTooLarge { .. } => 413,

            // 415 Unsupported Media Type
            Self::UnsupportedMediaType(_) => 415,

            // 429 Too Many Requests
            Self::RateLimited { .. } => 429,

            // 503 Service Unavailable
            Self::CircuitOpen { .. } | Self::DownstreamUnavailable(_) => 503,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::InactivePrincipal => "INACTIVE_PRINCIPAL",
            Self::AuthorizationFailed(_) => "AUTHORIZATION_FAILED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnsupportedVersion(_) => "UNSUPPORTED_VERSION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::CircuitOpen { .. } => "CIRCUIT_OPEN",
            Self::DownstreamUnavailable(_) => "DOWNSTREAM_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Build a response body, attaching the request id for log correlation
    pub fn new(err: &AppError, request_id: Option<String>) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            request_id,
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self::new(err, None)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
