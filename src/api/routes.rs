//! API Routes
//!
//! Configures the Axum router with the card endpoint and plain-text routes.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    card_handler, demo_handler, health_handler, index_handler, not_found_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api`, `GET /api/*` - Render a stats card
/// - `GET /` - Plain-text status line
/// - `GET /stats` - Demo page
/// - `GET /health` - Health check endpoint
/// - anything else - 404
///
/// # Middleware
/// - CORS: Allows any origin so cards can be fetched from any page
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api", get(card_handler))
        .route("/api/", get(card_handler))
        .route("/api/*rest", get(card_handler))
        .route("/", get(index_handler))
        .route("/stats", get(demo_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::{FetchError, Result};
    use crate::fetch::{FetchedBytes, Upstream};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    /// Knows one user, `octocat`, with no repositories and no avatar.
    struct OneUser;

    #[async_trait]
    impl Upstream for OneUser {
        async fn get_json(&self, url: &str) -> Result<Value> {
            if url.ends_with("/users/octocat") {
                Ok(json!({"login": "octocat", "public_repos": 8, "followers": 10}))
            } else if url.contains("/users/octocat/repos") {
                Ok(json!([]))
            } else {
                Err(FetchError::from_status(404))
            }
        }

        async fn get_bytes(&self, _url: &str) -> Result<FetchedBytes> {
            Err(FetchError::from_status(404))
        }
    }

    fn create_test_app() -> Router {
        create_router(AppState::new(Arc::new(OneUser), &Config::default()))
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_endpoint() {
        let response = get(create_test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_demo_endpoint() {
        let response = get(create_test_app(), "/stats").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_api_variants_route_to_card() {
        for uri in ["/api", "/api/", "/api/card", "/api/v1/card?username=octocat"] {
            let response = get(create_test_app(), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
            assert_eq!(response.headers()["content-type"], "image/svg+xml");
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let response = get(create_test_app(), "/api?username=nobody").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let response = get(create_test_app(), "/apix").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
