//! Routing module for the inventory and cart application

use crate::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
///
/// The item and cart routes are nested under `api_prefix`; an empty prefix
/// mounts them at the root.
pub fn create_app_router(state: SharedState, api_prefix: &str) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        tracing::info!(%method, %uri, "REQ");
        let res = next.run(req).await;
        if !res.status().is_success() {
            tracing::warn!(%method, %uri, status = %res.status(), "RES (Error)");
        }
        res
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(crate::inventory::routes())
        .merge(crate::cart::routes());

    let router = if api_prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(api_prefix, api)
    };

    // Routes
    router
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(cors_layer).layer(log_layer))
        .with_state(state)
}

/// Liveness check; does not touch the stores.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
