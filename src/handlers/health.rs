use axum::{extract::State, routing::get, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::models::Envelope;
use crate::service::CarService;

#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub status: &'static str,
    pub cars: u64,
}

pub fn router() -> Router<CarService> {
    Router::new().route("/health", get(health_check))
}

// Answers only when the store does; a store failure surfaces as a plain-text 500.
async fn health_check(
    State(service): State<CarService>,
) -> Result<Envelope<StoreHealth>, AppError> {
    let cars = service.health().await?;
    Ok(Envelope::ok(
        StoreHealth {
            status: "healthy",
            cars,
        },
        "Car store is reachable",
    ))
}
