pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::Router;
use handlers::{car, health};
use service::CarService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the HTTP application: car routes at the root, a health probe and a
/// plain-text 404 for everything else.
pub fn app(service: CarService) -> Router {
    Router::new()
        .merge(health::router())
        .merge(car::router())
        .fallback(error::path_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
