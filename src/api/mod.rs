//! HTTP API module: the `/user` passthrough plus health and metrics.

pub mod auth;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
