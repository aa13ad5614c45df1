//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::error::{GatewayError, Result};
use crate::fetch::UsernameFetcher;
use crate::metrics;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The fetch implementation selected at startup.
    pub fetcher: Arc<dyn UsernameFetcher>,
    /// Accepted `Authorization` values; empty accepts any non-empty value.
    pub auth_tokens: Arc<Vec<String>>,
    /// Prometheus render handle, present when the recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a fetcher.
    pub fn new(fetcher: Arc<dyn UsernameFetcher>, auth_tokens: Vec<String>) -> Self {
        Self {
            fetcher,
            auth_tokens: Arc::new(auth_tokens),
            prometheus: None,
        }
    }

    /// Attach a Prometheus render handle for the `/metrics` route.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// `GET /user` - forward the caller's credential downstream and echo the
/// username back as plain text.
///
/// The auth middleware has already rejected requests without an acceptable
/// `Authorization` header; the header is re-read here so the exact inbound
/// value is what goes downstream. Fetch failures propagate untouched and
/// are mapped to a response by [`GatewayError::into_response`].
pub async fn user(State(state): State<AppState>, headers: HeaderMap) -> Result<String> {
    metrics::inc_requests("/user");

    let credential = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(GatewayError::MissingCredential)?;

    let username = state.fetcher.find_username(Some(credential)).await?;

    Ok(username)
}

/// `GET /metrics` - Prometheus exposition text.
pub async fn prometheus_metrics(State(state): State<AppState>) -> String {
    match &state.prometheus {
        Some(handle) => handle.render(),
        None => String::new(),
    }
}
