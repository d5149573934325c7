use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::constants::API_NAME;
use crate::error::{path_not_found, AppError};
use crate::models::{Car, CarPage, Envelope, NewCar};
use crate::service::CarService;

pub fn router() -> Router<CarService> {
    Router::new()
        .route(
            "/",
            post(create_car)
                .get(list_cars)
                .fallback(path_not_found),
        )
        .route(
            "/:id",
            get(get_car)
                .patch(edit_car)
                .put(edit_car)
                .delete(delete_car)
                .fallback(path_not_found),
        )
}

async fn create_car(
    State(service): State<CarService>,
    payload: Result<Json<NewCar>, JsonRejection>,
) -> Result<Envelope<Car>, AppError> {
    let Json(new_car) = payload.map_err(|e| AppError::InvalidJson(e.body_text()))?;
    tracing::info!("{} Received create car request", API_NAME);

    let car = service.create_car(new_car).await?;
    Ok(Envelope::ok(car, "Create Car Success"))
}

async fn list_cars(
    State(service): State<CarService>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Envelope<CarPage>, AppError> {
    let page = service.list_cars(params).await?;
    Ok(Envelope::ok(page, "Found list of cars success"))
}

async fn get_car(
    State(service): State<CarService>,
    Path(id): Path<String>,
) -> Result<Envelope<Car>, AppError> {
    let car = service.get_car(&id).await?;
    Ok(Envelope::ok(car, "Found car success"))
}

async fn edit_car(
    State(service): State<CarService>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Envelope<Car>, AppError> {
    tracing::info!("{} Received update request for car: {}", API_NAME, id);
    let Json(changes) = payload.map_err(|e| AppError::InvalidJson(e.body_text()))?;

    let car = service.edit_car(&id, changes).await?;
    Ok(Envelope::ok(car, "Update car success"))
}

async fn delete_car(
    State(service): State<CarService>,
    Path(id): Path<String>,
) -> Result<Envelope<Car>, AppError> {
    tracing::info!("{} Received delete request for car: {}", API_NAME, id);

    let car = service.delete_car(&id).await?;
    Ok(Envelope::ok(car, "Delete car success"))
}
