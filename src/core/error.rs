//! Typed error handling for lessonhub
//!
//! The client surfaces a small error hierarchy so callers can react to
//! categories specifically instead of matching on strings:
//!
//! - [`ApiError`]: transport, HTTP status, and decode failures
//! - [`ValidationError`]: rejected user input, with per-field messages
//! - [`ConfigError`]: configuration loading and validation
//!
//! The engine itself ([`crate::core::query::evaluate`]) recognizes no
//! errors at all: malformed input degrades to safe defaults and an empty
//! page is a valid outcome, not a failure.

use reqwest::StatusCode;
use serde::Serialize;
use std::fmt;

/// The main error type for the lessonhub client.
#[derive(Debug)]
pub enum HubError {
    /// Errors talking to the backend API.
    Api(ApiError),

    /// Rejected user input.
    Validation(ValidationError),

    /// Configuration errors.
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation).
    Internal(String),
}

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HubError::Api(e) => write!(f, "{}", e),
            HubError::Validation(e) => write!(f, "{}", e),
            HubError::Config(e) => write!(f, "{}", e),
            HubError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for HubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HubError::Api(e) => Some(e),
            HubError::Validation(e) => Some(e),
            HubError::Config(e) => Some(e),
            HubError::Internal(_) => None,
        }
    }
}

impl HubError {
    /// HTTP status most closely describing this error, for surfaces that
    /// relay errors onward.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HubError::Api(e) => e.status_code(),
            HubError::Validation(_) => StatusCode::BAD_REQUEST,
            HubError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            HubError::Api(e) => e.error_code(),
            HubError::Validation(_) => "VALIDATION_ERROR",
            HubError::Config(_) => "CONFIG_ERROR",
            HubError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to a serializable report.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.error_code().to_string(),
            message: self.to_string(),
            fields: match self {
                HubError::Validation(ValidationError::FieldErrors(errors)) => errors.clone(),
                _ => Vec::new(),
            },
        }
    }
}

/// Serializable error report.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Per-field details for validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors from the backend API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connection, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },

    /// The response body did not decode into the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Http(_) => StatusCode::BAD_GATEWAY,
            ApiError::Status { status, .. } => *status,
            ApiError::Decode { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Http(_) => "API_UNREACHABLE",
            ApiError::Status { .. } => "API_STATUS",
            ApiError::Decode { .. } => "API_DECODE",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Errors from input validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("validation failed for {} field(s)", .0.len())]
    FieldErrors(Vec<FieldError>),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ApiError> for HubError {
    fn from(e: ApiError) -> Self {
        HubError::Api(e)
    }
}

impl From<ValidationError> for HubError {
    fn from(e: ValidationError) -> Self {
        HubError::Validation(e)
    }
}

impl From<ConfigError> for HubError {
    fn from(e: ConfigError) -> Self {
        HubError::Config(e)
    }
}

impl From<reqwest::Error> for HubError {
    fn from(e: reqwest::Error) -> Self {
        HubError::Api(ApiError::Http(e))
    }
}
