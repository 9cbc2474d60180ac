use axum::{extract::Request, http::StatusCode, middleware::Next, response::IntoResponse, Json, Router};
use log::{info, warn};
use tower_http::cors::{Any, CorsLayer};

/// CORS policy shared by every service: any origin, method and header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Logging middleware to trace all requests
pub async fn logging_middleware(req: Request, next: Next) -> impl IntoResponse {
    info!(
        "Router received request: method={}, uri={}",
        req.method(),
        req.uri()
    );
    next.run(req).await
}

/// JSON 404 for requests no route matched
pub async fn not_found_fallback(req: Request) -> impl IntoResponse {
    warn!("No route matched for: {} {}", req.method(), req.uri());
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "The requested resource was not found" })),
    )
}

/// Nests `routes` under `prefix`; an empty prefix serves them at the root.
pub fn with_prefix(routes: Router, prefix: &str) -> Router {
    if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    }
}
