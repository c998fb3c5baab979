//! API Routes
//!
//! Configures the Axum router with all listings server endpoints.

use axum::{
    routing::{delete, get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::admin::{
    create_api_key, create_news, create_property, delete_api_key, delete_news, delete_property,
    list_api_keys, update_news, update_property,
};
use super::handlers::{
    cache_stats, dashboard_stats, get_property, health_handler, list_news, list_properties,
    map_properties, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (the read API is consumed cross-site)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/properties",
            get(list_properties).post(create_property),
        )
        .route("/api/properties/map", get(map_properties))
        .route(
            "/api/properties/:id",
            get(get_property)
                .patch(update_property)
                .delete(delete_property),
        )
        .route("/api/news", get(list_news).post(create_news))
        .route("/api/news/:id", patch(update_news).delete(delete_news))
        .route("/api/api-keys", get(list_api_keys).post(create_api_key))
        .route("/api/api-keys/:id", delete(delete_api_key))
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/cache/stats", get(cache_stats))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
