//! Fixed-value fetcher for contexts without a reachable userecho service.
//!
//! Selected via `FETCHER=fixed`; also what the gateway tests run against
//! so handler behavior stays decoupled from network availability.

use async_trait::async_trait;

use crate::error::FetchError;

use super::UsernameFetcher;

/// Username answered by the substitute fetcher.
pub const FIXED_USERNAME: &str = "sherlock";

/// Substitute fetcher returning [`FIXED_USERNAME`] without any network call.
#[derive(Debug, Clone, Default)]
pub struct FixedUsernameFetcher;

impl FixedUsernameFetcher {
    /// Create a new fixed fetcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsernameFetcher for FixedUsernameFetcher {
    /// Always succeeds with [`FIXED_USERNAME`]; the credential is ignored.
    async fn find_username(&self, _credential: Option<&str>) -> Result<String, FetchError> {
        Ok(FIXED_USERNAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn returns_constant_without_credential() {
        let fetcher = FixedUsernameFetcher::new();
        let username = fetcher.find_username(None).await.unwrap();
        assert_eq!(username, "sherlock");
    }

    #[tokio::test]
    async fn credential_does_not_change_the_answer() {
        let fetcher = FixedUsernameFetcher::new();
        let username = fetcher
            .find_username(Some("Bearer abc123"))
            .await
            .unwrap();
        assert_eq!(username, "sherlock");
    }
}
