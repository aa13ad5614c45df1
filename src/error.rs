//! Unified error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Top-level error type for the gateway binary.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Downstream fetch error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Request carried no `Authorization` header.
    #[error("missing credential")]
    MissingCredential,

    /// Request carried a credential outside the configured allow-list.
    #[error("invalid credential")]
    InvalidCredential,

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the outbound userecho call.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The downstream request could not be issued or completed.
    #[error("userecho unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The downstream service answered with a non-success status.
    #[error("userecho returned HTTP {status}")]
    Status {
        /// Status code returned by the downstream service.
        status: StatusCode,
    },

    /// The downstream response body could not be read as text.
    #[error("failed to read userecho body: {0}")]
    Body(String),
}

/// JSON error body emitted for gateway-originated failures.
///
/// The success path is plain-text passthrough; only errors produced by the
/// gateway itself use this shape.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error detail.
    pub error: ErrorBody,
}

/// Code/message pair inside [`ErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            GatewayError::MissingCredential | GatewayError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "unauthorized".to_string(),
            ),
            GatewayError::Fetch(e) => (StatusCode::BAD_GATEWAY, "bad_gateway", e.to_string()),
            GatewayError::Config(_) | GatewayError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal server error".to_string(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_maps_to_401() {
        let response = GatewayError::MissingCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn invalid_credential_maps_to_401() {
        let response = GatewayError::InvalidCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn fetch_status_maps_to_502() {
        let err = GatewayError::Fetch(FetchError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn fetch_error_display_includes_status() {
        let err = FetchError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(
            err.to_string(),
            "userecho returned HTTP 503 Service Unavailable"
        );
    }
}
