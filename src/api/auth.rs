//! Credential check applied in front of `/user`.
//!
//! The gateway does not parse or validate tokens itself; it only enforces
//! that a credential is present (and, when an allow-list is configured,
//! listed) before the handler runs. Token semantics belong to whatever
//! issued them.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::error::GatewayError;
use crate::metrics;

use super::handlers::AppState;

/// Reject requests without an acceptable `Authorization` header.
///
/// Runs before the handler, so unauthenticated requests never reach the
/// fetch capability.
pub async fn require_credential(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let credential = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let credential = match credential {
        Some(c) => c,
        None => {
            metrics::inc_unauthorized();
            debug!("rejected request without credential");
            return GatewayError::MissingCredential.into_response();
        }
    };

    if !state.auth_tokens.is_empty() && !state.auth_tokens.iter().any(|t| t == credential) {
        metrics::inc_unauthorized();
        debug!("rejected request with unlisted credential");
        return GatewayError::InvalidCredential.into_response();
    }

    next.run(request).await
}
