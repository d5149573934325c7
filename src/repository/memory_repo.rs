use super::{CarQuery, CarStore, StoreError};
use crate::models::{Car, CarDocument, CarPatch};
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process document store. Records keep insertion order.
#[derive(Clone, Default)]
pub struct MemoryCarStore {
    cars: Arc<RwLock<Vec<Car>>>,
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(car: &Car, query: &CarQuery) -> bool {
    query
        .filters
        .iter()
        .all(|(field, value)| car.document.field_text(field).as_deref() == Some(value.as_str()))
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn create(&self, document: CarDocument) -> Result<Car, StoreError> {
        let car = Car::new(document);
        self.cars.write().await.push(car.clone());
        Ok(car)
    }

    async fn find(&self, query: &CarQuery) -> Result<Vec<Car>, StoreError> {
        let cars = self.cars.read().await;
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(cars
            .iter()
            .filter(|car| matches(car, query))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.cars.read().await.len() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, StoreError> {
        Ok(self.cars.read().await.iter().find(|car| car.id == id).cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        patch: &CarPatch,
    ) -> Result<Option<Car>, StoreError> {
        let mut cars = self.cars.write().await;
        Ok(cars.iter_mut().find(|car| car.id == id).map(|car| {
            car.document.apply(patch);
            car.updated_at = Utc::now().trunc_subsecs(6);
            car.clone()
        }))
    }
}
