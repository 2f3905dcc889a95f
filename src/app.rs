//! Router assembly: routes, CORS, body limit and request tracing.

use crate::config::Config;
use crate::handlers::{self, AppState};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the CORS policy for the classification endpoint.
///
/// Preflights get `Allow-Methods: POST, OPTIONS` and `Allow-Headers: Content-Type`.
/// A configured origin list also allows credentials; the `*` wildcard cannot.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Builds the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let classify_routes = Router::new()
        .route("/api/classify", post(handlers::classify))
        // Path used by the embeddable frontend widget
        .route("/classify", post(handlers::classify))
        // Oversized bodies surface as a `JsonRejection` in the handler
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes));

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/docs", get(handlers::serve_swagger_ui))
        .route("/api-docs/openapi.json", get(handlers::openapi_spec))
        .merge(classify_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
