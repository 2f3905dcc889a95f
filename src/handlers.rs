use crate::anthropic_client::AnthropicClient;
use crate::classifier::{ClassificationService, CompletionProvider};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::*;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Classifier backed by the configured text-generation provider.
    pub classifier: ClassificationService,
}

impl AppState {
    /// Builds state around an arbitrary provider.
    pub fn new(config: Config, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            config,
            classifier: ClassificationService::new(provider),
        }
    }

    /// Builds state around the Anthropic Messages API client.
    pub fn with_anthropic(config: Config) -> Result<Self, AppError> {
        let client = AnthropicClient::new(&config)?;
        tracing::info!("✓ Anthropic client initialized: model={}", client.model());
        Ok(Self::new(config, Arc::new(client)))
    }
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/classify
///
/// Classifies a free-text product description into an HS code.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - JSON body with `product_description`. Unreadable bodies are
///   reported as a JSON `BadRequest` rather than axum's plain-text rejection.
///
/// # Returns
///
/// * `Result<Json<ClassificationResult>, AppError>` - The classification or an error.
#[utoipa::path(
    post,
    path = "/api/classify",
    request_body = ClassificationRequest,
    responses(
        (status = 200, description = "Classification produced by the model", body = ClassificationResult),
        (status = 400, description = "Missing product description or malformed body", body = ErrorResponse),
        (status = 500, description = "Upstream credential not configured", body = ErrorResponse),
        (status = 502, description = "Upstream failure or unparseable model reply", body = ErrorResponse)
    ),
    tag = "classification"
)]
pub async fn classify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::info!("Classification request received");

    let result = state
        .classifier
        .classify(&request.product_description)
        .await?;

    Ok(Json(result))
}

#[derive(OpenApi)]
#[openapi(
    paths(classify),
    components(schemas(ClassificationRequest, ClassificationResult, Confidence, ErrorResponse)),
    tags((name = "classification", description = "HS tariff code classification"))
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Serves the Swagger UI HTML page.
///
/// The page loads the document served by `openapi_spec`.
pub async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tariff Classify API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (status, Json(body)) = health().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "tariff-classify-api");
    }

    #[test]
    fn test_openapi_documents_classify_endpoint() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/api/classify"]["post"].is_object());
        assert!(doc["components"]["schemas"]["ClassificationResult"].is_object());
    }
}
