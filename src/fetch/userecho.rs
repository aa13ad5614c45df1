//! Userecho service client.

use std::time::Instant;

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::FetchError;
use crate::metrics;

use super::UsernameFetcher;

/// Production fetcher calling the downstream userecho service over HTTP.
#[derive(Debug, Clone)]
pub struct UserEchoClient {
    /// HTTP client with pooled connections.
    http: reqwest::Client,
    /// Base URL of the userecho service.
    base_url: String,
}

impl UserEchoClient {
    /// Create a new client from config with tuned HTTP settings.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(std::time::Duration::from_millis(
                config.http_connect_timeout_ms,
            ))
            // TCP_NODELAY for low-latency (disable Nagle's algorithm)
            .tcp_nodelay(true)
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .pool_max_idle_per_host(config.http_pool_size)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            base_url: config.userecho_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a credential-less request to check downstream reachability.
    ///
    /// Used by the `check-upstream` subcommand. Any HTTP answer counts as
    /// reachable; only transport failures are errors.
    #[instrument(skip(self))]
    pub async fn probe(&self) -> Result<StatusCode, FetchError> {
        let url = format!("{}/user", self.base_url);
        let response = self.http.get(&url).send().await?;
        Ok(response.status())
    }
}

#[async_trait]
impl UsernameFetcher for UserEchoClient {
    /// Forward the credential to `GET {base_url}/user` and return the
    /// plain-text body verbatim.
    #[instrument(skip(self, credential))]
    async fn find_username(&self, credential: Option<&str>) -> Result<String, FetchError> {
        let url = format!("{}/user", self.base_url);
        let start = Instant::now();

        let mut request = self.http.get(&url).header(ACCEPT, "text/plain");
        if let Some(credential) = credential {
            request = request.header(AUTHORIZATION, credential);
        }

        let response = request.send().await.map_err(|e| {
            metrics::inc_upstream_failures();
            FetchError::Unreachable(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            metrics::inc_upstream_failures();
            return Err(FetchError::Status { status });
        }

        let body = response.text().await.map_err(|e| {
            metrics::inc_upstream_failures();
            FetchError::Body(e.to_string())
        })?;

        metrics::record_upstream_latency(start);
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "userecho answered");

        Ok(body)
    }
}
