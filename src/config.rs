//! Application configuration loaded from environment variables.

use serde::Deserialize;
use url::Url;

/// Which fetch implementation to wire in at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherMode {
    /// Production client calling the downstream userecho service.
    Userecho,
    /// Fixed-value substitute, no network calls.
    Fixed,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Downstream Service ===
    /// Base URL of the userecho service (e.g., http://userecho:8081).
    #[serde(default = "default_userecho_url")]
    pub userecho_url: String,

    /// Fetcher selection: "userecho" or "fixed".
    #[serde(default = "default_fetcher")]
    pub fetcher: FetcherMode,

    // === Inbound Auth ===
    /// Accepted `Authorization` values, comma-separated. Empty means any
    /// non-empty credential is accepted (validation delegated upstream).
    #[serde(default)]
    pub gateway_auth_tokens: Vec<String>,

    // === HTTP Client Tuning ===
    /// Downstream request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Downstream connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub http_connect_timeout_ms: u64,

    /// Max idle connections per host in the downstream pool.
    #[serde(default = "default_pool_size")]
    pub http_pool_size: usize,

    // === Server ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level filter.
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_userecho_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_fetcher() -> FetcherMode {
    FetcherMode::Userecho
}

fn default_http_timeout_ms() -> u64 {
    5000
}

fn default_connect_timeout_ms() -> u64 {
    500
}

fn default_pool_size() -> usize {
    10
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetcher == FetcherMode::Userecho {
            let url = Url::parse(&self.userecho_url)
                .map_err(|e| format!("USERECHO_URL is not a valid URL: {}", e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err("USERECHO_URL must use http or https".to_string());
            }
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.gateway_auth_tokens.iter().any(|t| t.trim().is_empty()) {
            return Err("GATEWAY_AUTH_TOKENS contains an empty entry".to_string());
        }

        Ok(())
    }

    /// Whether the fixed substitute fetcher is selected.
    pub fn is_fixed(&self) -> bool {
        self.fetcher == FetcherMode::Fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            userecho_url: default_userecho_url(),
            fetcher: default_fetcher(),
            gateway_auth_tokens: Vec::new(),
            http_timeout_ms: default_http_timeout_ms(),
            http_connect_timeout_ms: default_connect_timeout_ms(),
            http_pool_size: default_pool_size(),
            port: default_port(),
            rust_log: default_log_level(),
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_userecho_url(), "http://localhost:8081");
        assert_eq!(default_fetcher(), FetcherMode::Userecho);
        assert_eq!(default_http_timeout_ms(), 5000);
        assert_eq!(default_port(), 8080);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_url() {
        let config = Config {
            userecho_url: "not a url".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let config = Config {
            userecho_url: "ftp://userecho:21".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_ignores_url_in_fixed_mode() {
        let config = Config {
            userecho_url: "not a url".to_string(),
            fetcher: FetcherMode::Fixed,
            ..base_config()
        };
        assert!(config.validate().is_ok());
        assert!(config.is_fixed());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_ms: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_auth_token() {
        let config = Config {
            gateway_auth_tokens: vec!["Bearer abc".to_string(), "  ".to_string()],
            ..base_config()
        };
        assert!(config.validate().is_err());
    }
}
