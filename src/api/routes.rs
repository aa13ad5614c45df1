//! HTTP API route definitions.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::auth::require_credential;
use super::handlers::{health, prometheus_metrics, user, AppState};

/// Create the API router.
///
/// `/user` sits behind the credential check; `/health` and `/metrics` are
/// open.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/user",
            get(user).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_credential,
            )),
        )
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FixedUsernameFetcher;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn fixed_router(auth_tokens: Vec<String>) -> Router {
        let state = AppState::new(Arc::new(FixedUsernameFetcher::new()), auth_tokens);
        create_router(state)
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let response = fixed_router(Vec::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn user_without_credential_is_unauthorized() {
        let response = fixed_router(Vec::new())
            .oneshot(Request::builder().uri("/user").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn user_with_credential_returns_username() {
        let response = fixed_router(Vec::new())
            .oneshot(
                Request::builder()
                    .uri("/user")
                    .header("Authorization", "Bearer abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn user_with_unlisted_credential_is_unauthorized() {
        let response = fixed_router(vec!["Bearer listed".to_string()])
            .oneshot(
                Request::builder()
                    .uri("/user")
                    .header("Authorization", "Bearer unlisted")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn metrics_endpoint_answers_without_recorder() {
        let response = fixed_router(Vec::new())
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
