//! API Module
//!
//! HTTP handlers and routing for the listings REST API.
//!
//! # Endpoints
//! - `GET /api/properties` - Filtered, sorted, paginated listing
//! - `GET /api/properties/map` - Lightweight map pins
//! - `GET /api/properties/:id` - Single record, uncached
//! - `POST/PATCH/DELETE /api/properties[...]` - Admin CRUD
//! - `GET/POST/PATCH/DELETE /api/news[...]` - News articles
//! - `GET/POST/DELETE /api/api-keys[...]` - API credentials
//! - `GET /api/dashboard/stats` - Aggregate dataset statistics
//! - `GET /api/cache/stats` - Cache observability counters
//! - `GET /health` - Health check

pub mod admin;
pub mod auth;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
