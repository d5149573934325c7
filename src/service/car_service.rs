use super::list_query::{parse_id, ListPolicy, ListQuery};
use crate::constants::{API_NAME, MUTABLE_CAR_FIELDS};
use crate::error::AppError;
use crate::models::{Car, CarPage, CarPatch, NewCar};
use crate::repository::CarStore;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Create, list, edit and soft-delete operations over an injected car store.
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn CarStore>,
    policy: ListPolicy,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>, policy: ListPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn create_car(&self, new_car: NewCar) -> Result<Car, AppError> {
        let missing = new_car.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing body info: {}",
                missing.join(", ")
            )));
        }
        let document = new_car
            .into_document()
            .ok_or_else(|| AppError::Validation("Missing body info".to_string()))?;

        let car = self.store.create(document).await?;
        tracing::info!("{} Created car: {}", API_NAME, car.id);
        Ok(car)
    }

    pub async fn list_cars(&self, params: BTreeMap<String, String>) -> Result<CarPage, AppError> {
        let query = ListQuery::parse(params, &self.policy)?;

        let collection_size = self.store.count().await?;
        let cars = self.store.find(&query.to_store_query()).await?;
        tracing::info!(
            "{} Listed {} of {} cars (page {}, limit {}, filters {:?})",
            API_NAME,
            cars.len(),
            collection_size,
            query.page,
            query.limit,
            query.filters
        );

        Ok(CarPage {
            cars,
            total: query.total_pages(collection_size),
            page: query.page,
        })
    }

    /// Store liveness: the size of the car collection.
    pub async fn health(&self) -> Result<u64, AppError> {
        Ok(self.store.count().await?)
    }

    pub async fn get_car(&self, raw_id: &str) -> Result<Car, AppError> {
        let id = parse_id(raw_id)?;
        self.find_existing(id).await
    }

    pub async fn edit_car(&self, raw_id: &str, changes: Map<String, Value>) -> Result<Car, AppError> {
        let id = parse_id(raw_id)?;

        let rejected: Vec<&str> = changes
            .keys()
            .map(String::as_str)
            .filter(|key| !MUTABLE_CAR_FIELDS.contains(key))
            .collect();
        if !rejected.is_empty() {
            return Err(AppError::Validation(format!(
                "Update field not allow: {}",
                rejected.join(", ")
            )));
        }

        let nulled: Vec<&str> = changes
            .iter()
            .filter(|(key, value)| {
                value.is_null() || (key.as_str() == "release_date" && value.as_str() == Some(""))
            })
            .map(|(key, _)| key.as_str())
            .collect();
        if !nulled.is_empty() {
            return Err(AppError::Validation(format!(
                "Update field cannot be null: {}",
                nulled.join(", ")
            )));
        }

        let patch: CarPatch = serde_json::from_value(Value::Object(changes))
            .map_err(|e| AppError::InvalidJson(e.to_string()))?;

        let car = self.update_existing(id, &patch).await?;
        tracing::info!("{} Updated car: {}", API_NAME, car.id);
        Ok(car)
    }

    pub async fn delete_car(&self, raw_id: &str) -> Result<Car, AppError> {
        let id = parse_id(raw_id)?;
        let car = self.update_existing(id, &CarPatch::soft_delete()).await?;
        tracing::info!("{} Soft-deleted car: {}", API_NAME, car.id);
        Ok(car)
    }

    async fn find_existing(&self, id: Uuid) -> Result<Car, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
    }

    // Existence check and update are separate store calls with no lock between them.
    async fn update_existing(&self, id: Uuid, patch: &CarPatch) -> Result<Car, AppError> {
        self.find_existing(id).await?;
        self.store
            .find_by_id_and_update(id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
    }
}
