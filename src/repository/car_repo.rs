use super::{CarQuery, CarStore, StoreError};
use crate::models::{Car, CarDocument, CarPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

#[derive(FromRow)]
struct CarRow {
    id: Uuid,
    document: Json<CarDocument>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: row.id,
            document: row.document.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Cars stored as JSONB documents in PostgreSQL.
#[derive(Clone)]
pub struct PgCarStore {
    pool: PgPool,
}

impl PgCarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn create(&self, document: CarDocument) -> Result<Car, StoreError> {
        let car = Car::new(document);
        sqlx::query(
            "INSERT INTO cars (id, document, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(car.id)
        .bind(Json(&car.document))
        .bind(car.created_at)
        .bind(car.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(car)
    }

    async fn find(&self, query: &CarQuery) -> Result<Vec<Car>, StoreError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT id, document, created_at, updated_at FROM cars");

        for (i, (field, value)) in query.filters.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder
                .push("document ->> ")
                .push_bind(field.as_str())
                .push(" = ")
                .push_bind(value.as_str());
        }

        builder
            .push(" ORDER BY created_at, id LIMIT ")
            .push_bind(to_sql_count(query.limit))
            .push(" OFFSET ")
            .push_bind(to_sql_count(query.offset));

        let rows = builder
            .build_query_as::<CarRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, StoreError> {
        let row = sqlx::query_as::<_, CarRow>(
            "SELECT id, document, created_at, updated_at FROM cars WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Car::from))
    }

    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        patch: &CarPatch,
    ) -> Result<Option<Car>, StoreError> {
        let changes = serde_json::to_value(patch)?;
        let row = sqlx::query_as::<_, CarRow>(
            "UPDATE cars SET document = document || $1, updated_at = now() WHERE id = $2 \
             RETURNING id, document, created_at, updated_at",
        )
        .bind(Json(changes))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Car::from))
    }
}

fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
