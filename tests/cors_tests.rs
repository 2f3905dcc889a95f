/// CORS behaviour of the classification endpoint
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tariff_classify_api::app::build_router;
use tariff_classify_api::classifier::CompletionProvider;
use tariff_classify_api::config::Config;
use tariff_classify_api::errors::AppError;
use tariff_classify_api::handlers::AppState;
use tower::ServiceExt;

/// Provider that must never be reached by a preflight
struct Unreachable;

#[async_trait]
impl CompletionProvider for Unreachable {
    async fn complete(&self, _prompt: &str) -> Result<String, AppError> {
        panic!("preflight must not reach the upstream provider");
    }
}

fn create_app(config: Config) -> Router {
    build_router(Arc::new(AppState::new(config, Arc::new(Unreachable))))
}

async fn preflight(app: Router, origin: &str, body: &'static str) -> (StatusCode, HeaderMap) {
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/classify")
                .header("origin", origin)
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    (response.status(), response.headers().clone())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {}", name))
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_preflight_returns_cors_headers() {
    for body in ["", r#"{"product_description": "ignored"}"#, "garbage"] {
        let (status, headers) =
            preflight(create_app(Config::default()), "https://tariffsolver.com", body).await;

        assert!(status.is_success());
        assert_eq!(
            header_str(&headers, "access-control-allow-origin"),
            "https://tariffsolver.com"
        );

        let methods = header_str(&headers, "access-control-allow-methods");
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));

        let allowed_headers = header_str(&headers, "access-control-allow-headers");
        assert!(allowed_headers.eq_ignore_ascii_case("content-type"));
    }
}

#[tokio::test]
async fn test_preflight_from_local_frontend() {
    let (_, headers) = preflight(create_app(Config::default()), "http://localhost:3000", "").await;

    assert_eq!(
        header_str(&headers, "access-control-allow-origin"),
        "http://localhost:3000"
    );
    assert_eq!(
        header_str(&headers, "access-control-allow-credentials"),
        "true"
    );
}

#[tokio::test]
async fn test_unknown_origin_is_not_allowed() {
    let (_, headers) = preflight(create_app(Config::default()), "https://evil.example", "").await;

    assert!(headers.get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_wildcard_origin() {
    let config = Config {
        cors_allowed_origins: vec!["*".to_string()],
        ..Config::default()
    };
    let (_, headers) = preflight(create_app(config), "https://anywhere.example", "").await;

    assert_eq!(header_str(&headers, "access-control-allow-origin"), "*");
    assert!(headers.get("access-control-allow-credentials").is_none());
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let response = create_app(Config::default())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/classify")
                .header("origin", "https://tariffsolver.com")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"product_description": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header_str(response.headers(), "access-control-allow-origin"),
        "https://tariffsolver.com"
    );
}
