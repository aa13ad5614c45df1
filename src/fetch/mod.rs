//! Username fetch capability.
//!
//! This module defines:
//! - The [`UsernameFetcher`] trait, the seam between the inbound handler
//!   and whatever resolves a credential to a username
//! - [`UserEchoClient`], the production implementation calling the
//!   downstream userecho service
//! - [`FixedUsernameFetcher`], a substitute that answers without the network

pub mod fixed;
pub mod userecho;

use async_trait::async_trait;

use crate::error::FetchError;

pub use fixed::{FixedUsernameFetcher, FIXED_USERNAME};
pub use userecho::UserEchoClient;

/// Resolve a credential to a username.
///
/// Implementations are selected once at startup and shared behind
/// `Arc<dyn UsernameFetcher>`; call sites never know which one they hold.
#[async_trait]
pub trait UsernameFetcher: Send + Sync {
    /// Look up the username for the given credential.
    ///
    /// `None` is the credential-less form used by substitutes and probes;
    /// the production request path always passes `Some`.
    async fn find_username(&self, credential: Option<&str>) -> Result<String, FetchError>;
}
