//! Authenticated single-hop gateway for the userecho service.
//!
//! `GET /user` takes the caller's `Authorization` header, forwards it
//! verbatim to a downstream userecho service, and returns the downstream
//! plain-text username unchanged. One header copied, one call made, one
//! body echoed back.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types and HTTP mapping
//! - [`fetch`]: The username fetch capability and its implementations
//! - [`api`]: HTTP routes, handlers, and the credential check
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{GatewayError, Result};
