//! HTTP surface of the repository configuration service.

use std::sync::Arc;

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::app_state::{AppState, ConfigError, ServiceConfig};
pub use crate::error_handler::{AppError, AppResult};

use axum::{Router, middleware, routing::get};
use config_store::{ConfigStore, FileSource};
use tokio::signal;
use tracing::{error, info};

use crate::{
    middleware_layer::request_id::request_id,
    routes::configs::{
        environment_config_route::environment_config_route,
        list_configs_route::list_configs_route, repo_config_route::repo_config_route,
    },
};

/// Build the router over an already-loaded store.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/configs", get(list_configs_route))
        .route("/configs/{repo}", get(repo_config_route))
        .route(
            "/configs/{repo}/{app}/{environment}",
            get(environment_config_route),
        )
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Load the configuration document, then serve it until Ctrl+C.
///
/// Nothing is bound if settings, the payload, or decoding fail.
pub async fn start() -> AppResult<()> {
    let config = ServiceConfig::from_env()?;

    let source = FileSource::new(&config.config_path);
    let store = ConfigStore::from_source(&source).await?;

    let address = config.api_address.clone();
    let app = router(Arc::new(AppState::new(config, store)));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(AppError::Bind)?;
    info!(%address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        // Without a signal handler the server just keeps running.
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const FIXTURE: &str = r#"{
        "repositories": [
            {
                "name": "payments",
                "url": "git@github.com:acme/payments.git",
                "apps": [{
                    "appName": "api",
                    "environments": [{
                        "name": "prod",
                        "awsAccountId": "111",
                        "iamRoles": [{"roleName": "deploy", "policyArn": "arn:aws:iam::111:policy/deploy"}],
                        "terraformBackend": {"s3": {
                            "bucket": "tf-state",
                            "key": "payments/prod.tfstate",
                            "region": "us-east-1"
                        }}
                    }]
                }]
            },
            {
                "name": "shared",
                "url": "first",
                "apps": [{"appName": "svc", "environments": [{"name": "dev", "awsAccountId": "1"}]}]
            },
            {
                "name": "shared",
                "url": "second",
                "apps": [{"appName": "svc", "environments": [{"name": "dev", "awsAccountId": "2"}]}]
            },
            {
                "name": "my repo",
                "apps": [{"appName": "api", "environments": [{"name": "qa", "awsAccountId": "7"}]}]
            }
        ]
    }"#;

    fn app() -> Router {
        let store = ConfigStore::load(FIXTURE.as_bytes()).unwrap();
        router(Arc::new(AppState::new(ServiceConfig::default(), store)))
    }

    async fn get_json(uri: &str) -> (StatusCode, Option<Value>) {
        let res = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn list_returns_whole_document() {
        let (status, body) = get_json("/configs").await;
        assert_eq!(status, StatusCode::OK);

        let expected: Value = serde_json::from_str(FIXTURE).unwrap();
        let body = body.unwrap();
        assert_eq!(body["repositories"].as_array().unwrap().len(), 4);
        assert_eq!(body["repositories"][0], expected["repositories"][0]);
    }

    #[tokio::test]
    async fn environment_route_returns_bare_record() {
        let (status, body) = get_json("/configs/payments/api/prod").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.unwrap(),
            json!({
                "name": "prod",
                "awsAccountId": "111",
                "iamRoles": [{"roleName": "deploy", "policyArn": "arn:aws:iam::111:policy/deploy"}],
                "terraformBackend": {"s3": {
                    "bucket": "tf-state",
                    "key": "payments/prod.tfstate",
                    "region": "us-east-1"
                }}
            })
        );
    }

    #[tokio::test]
    async fn unknown_environment_is_404_with_reason() {
        let (status, body) = get_json("/configs/payments/api/staging").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body.unwrap(),
            json!({"error": "NOT_FOUND", "message": "Configuration not found"})
        );
    }

    #[tokio::test]
    async fn unknown_repository_is_404() {
        let (status, _) = get_json("/configs/unknown-repo/api/prod").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn repository_only_route_is_404_even_when_repo_exists() {
        let (status, body) = get_json("/configs/payments").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.unwrap()["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn first_duplicate_repository_wins() {
        let (status, body) = get_json("/configs/shared/svc/dev").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["awsAccountId"], "1");
    }

    #[tokio::test]
    async fn percent_encoded_segments_are_decoded() {
        let (status, body) = get_json("/configs/my%20repo/api/qa").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["awsAccountId"], "7");
    }

    #[tokio::test]
    async fn two_segment_path_has_no_route() {
        let (status, _) = get_json("/configs/payments/api").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn success_is_served_as_json() {
        let res = app()
            .oneshot(Request::builder().uri("/configs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/configs/payments/api/prod")
                    .header("X-Request-Id", "trace-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.headers().get("X-Request-Id").unwrap(), "trace-42");

        let res = app()
            .oneshot(Request::builder().uri("/configs/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let id = res.headers().get("X-Request-Id").unwrap().to_str().unwrap();
        assert!(id.starts_with("req-"));
    }

    #[tokio::test]
    async fn routes_serve_with_custom_settings() {
        let config = ServiceConfig {
            api_address: "127.0.0.1:0".into(),
            config_path: "/etc/repo-config/config.json".into(),
        };
        let store = ConfigStore::load(FIXTURE.as_bytes()).unwrap();
        let app = router(Arc::new(AppState::new(config, store)));

        for (uri, status) in [
            ("/configs", StatusCode::OK),
            ("/configs/payments", StatusCode::NOT_FOUND),
            ("/configs/payments/api/prod", StatusCode::OK),
        ] {
            let res = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(res.status(), status, "{uri}");
        }
    }

    #[tokio::test]
    async fn repeated_requests_return_identical_bodies() {
        let first = get_json("/configs/payments/api/prod").await;
        let second = get_json("/configs/payments/api/prod").await;
        assert_eq!(first, second);
    }
}
