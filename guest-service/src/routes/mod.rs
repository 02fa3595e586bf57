use axum::{
    extract::Request,
    middleware,
    routing::get,
    Json, Router,
};
use guestlist_shared::config::EventCatalog;
use guestlist_shared::store::FamilyStore;
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    export_handlers::{export_guest_list, print_guest_list},
    family_handlers::{create_family, delete_family, get_families, get_family, update_family},
    stats_handlers::{get_event_statistics, get_events, get_statistics},
};
use crate::models::AppState;

// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "message": "Wedding Guest List API is running"
    }))
}

/// Creates the router for a store and event catalog. API routes are nested
/// under `prefix` unless it is empty; `/health` is always at the root.
pub fn create_router_with_store<S>(store: Arc<S>, events: Arc<EventCatalog>, prefix: &str) -> Router
where
    S: FamilyStore + 'static,
{
    info!("Setting up API routes with prefix: '{}'", prefix);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let api_routes = Router::new()
        .route("/families", get(get_families).post(create_family))
        .route(
            "/families/:id",
            get(get_family).put(update_family).delete(delete_family),
        )
        .route("/stats", get(get_statistics))
        .route("/stats/events", get(get_event_statistics))
        .route("/events", get(get_events))
        .route("/export", get(export_guest_list))
        .route("/print", get(print_guest_list))
        .with_state(AppState::new(store, events));

    let router = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(prefix, api_routes)
    };

    let router = router
        .route("/health", get(health))
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware));

    info!(
        "Router configured with all routes and middleware under prefix: '{}'",
        prefix
    );

    // Add a fallback handler for 404s
    router.fallback(|req: Request| async move {
        warn!("No route matched for: {} {}", req.method(), req.uri());
        (
            axum::http::StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    })
}
