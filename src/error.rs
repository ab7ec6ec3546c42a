//! Error types for the ChatKit server
//!
//! `ConfigError` is raised while loading settings and is fatal at startup
//! outside debug mode. `SessionError` covers everything that can go wrong
//! while creating a ChatKit session and renders itself as a JSON
//! `{"error": ...}` response.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors detected at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} environment variable not set")]
    Missing { var: &'static str },

    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Failures while creating a session against the ChatKit sessions API
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("ChatKit sessions API timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Failed to reach ChatKit sessions API: {0}")]
    Network(String),

    #[error("ChatKit sessions API error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response from ChatKit sessions API: {0}")]
    InvalidResponse(String),
}

impl SessionError {
    /// HTTP status returned to the browser for this error.
    ///
    /// Upstream client/server errors keep their status; anything else the
    /// upstream sends back is reported as a bad gateway.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SessionError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SessionError::Network(_) | SessionError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            SessionError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }

    /// Whether trying again later has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Timeout(_) | SessionError::Network(_) => true,
            SessionError::Upstream { status, .. } => *status == 429 || *status >= 500,
            SessionError::NotConfigured(_) | SessionError::InvalidResponse(_) => false,
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
