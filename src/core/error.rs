//! Typed error handling for list screens and the gateway
//!
//! # Error Categories
//!
//! - [`FetchError`]: failures talking to the backend that feeds a List Store
//! - [`QueryError`]: malformed search/sort/page requests
//! - [`ScreenError`]: unknown screens
//! - [`ConfigError`]: configuration loading and validation
//!
//! An empty result is never an error; it is rendered as a "no data" state.
//!
//! # Example
//!
//! ```rust,ignore
//! match client.get_list::<Booking>("/admin/bookings").await {
//!     Ok(bookings) => render(bookings),
//!     Err(FetchError::Network { .. }) => alert("Cannot connect to server"),
//!     Err(e) => alert(&e.to_string()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Message shown when the backend cannot be reached
pub const NETWORK_ERROR_MESSAGE: &str = "Cannot connect to server";

/// Fallback when a non-success response carries no message
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred, please try again";

/// The main error type for the gateway
#[derive(Debug)]
pub enum TourdeskError {
    /// Backend fetch or mutation failed
    Fetch(FetchError),

    /// Bad query parameters
    Query(QueryError),

    /// Screen or record lookup failed
    Screen(ScreenError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for TourdeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourdeskError::Fetch(e) => write!(f, "{}", e),
            TourdeskError::Query(e) => write!(f, "{}", e),
            TourdeskError::Screen(e) => write!(f, "{}", e),
            TourdeskError::Config(e) => write!(f, "{}", e),
            TourdeskError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for TourdeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TourdeskError::Fetch(e) => Some(e),
            TourdeskError::Query(e) => Some(e),
            TourdeskError::Screen(e) => Some(e),
            TourdeskError::Config(e) => Some(e),
            TourdeskError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TourdeskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TourdeskError::Fetch(e) => e.status_code(),
            TourdeskError::Query(_) => StatusCode::BAD_REQUEST,
            TourdeskError::Screen(_) => StatusCode::NOT_FOUND,
            TourdeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TourdeskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TourdeskError::Fetch(e) => e.error_code(),
            TourdeskError::Query(_) => "INVALID_QUERY",
            TourdeskError::Screen(ScreenError::UnknownScreen { .. }) => "UNKNOWN_SCREEN",
            TourdeskError::Config(_) => "CONFIG_ERROR",
            TourdeskError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            TourdeskError::Query(QueryError::UnknownSortField { field, allowed }) => {
                Some(serde_json::json!({ "field": field, "allowed": allowed }))
            }
            TourdeskError::Fetch(FetchError::Status { status, .. }) => {
                Some(serde_json::json!({ "upstream_status": status }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for TourdeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors from the backend feeding a List Store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The backend could not be reached (connect, timeout, transport)
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network { reason: String },

    /// The backend answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The backend answered with a body we cannot read
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// A newer request superseded this one
    #[error("Request was superseded")]
    Aborted,
}

impl FetchError {
    /// Build a status error, falling back to the generic message
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        FetchError::Status { status, message }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchError::Network { .. } => StatusCode::BAD_GATEWAY,
            FetchError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            FetchError::Decode(_) => StatusCode::BAD_GATEWAY,
            FetchError::Aborted => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "UPSTREAM_UNREACHABLE",
            FetchError::Status { .. } => "UPSTREAM_ERROR",
            FetchError::Decode(_) => "UPSTREAM_INVALID_RESPONSE",
            FetchError::Aborted => "REQUEST_SUPERSEDED",
        }
    }
}

impl From<FetchError> for TourdeskError {
    fn from(err: FetchError) -> Self {
        TourdeskError::Fetch(err)
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors in list query parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid sort: {0}")]
    InvalidSort(String),

    #[error("Cannot sort on '{field}'")]
    UnknownSortField {
        field: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filter '{name}': {message}")]
    InvalidFilter { name: String, message: String },
}

impl From<QueryError> for TourdeskError {
    fn from(err: QueryError) -> Self {
        TourdeskError::Query(err)
    }
}

// =============================================================================
// Screen Errors
// =============================================================================

/// Errors locating a screen
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreenError {
    #[error("Unknown screen: {name}")]
    UnknownScreen { name: String },
}

impl From<ScreenError> for TourdeskError {
    fn from(err: ScreenError) -> Self {
        TourdeskError::Screen(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for TourdeskError {
    fn from(err: ConfigError) -> Self {
        TourdeskError::Config(err)
    }
}

impl From<anyhow::Error> for TourdeskError {
    fn from(err: anyhow::Error) -> Self {
        TourdeskError::Internal(err.to_string())
    }
}
