use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

// Accepts RFC 3339 strings, numeric strings and numbers as Unix timestamps in milliseconds.
// Null and empty strings count as absent.
fn deserialize_release_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DateTimeOrTimestamp {
        String(String),
        Number(i64),
    }

    match Option::<DateTimeOrTimestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(DateTimeOrTimestamp::String(s)) if s.is_empty() => Ok(None),
        Some(DateTimeOrTimestamp::String(s)) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
                return Ok(Some(dt.with_timezone(&Utc)));
            }
            if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Some(dt.and_utc()));
                }
            }
            if let Ok(ms) = s.parse::<i64>() {
                if let Some(dt) = DateTime::from_timestamp_millis(ms) {
                    return Ok(Some(dt));
                }
            }
            Err(D::Error::custom(format!("Invalid date format: {}", s)))
        }
        Some(DateTimeOrTimestamp::Number(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("Invalid timestamp: {}", ms))),
    }
}

/// The stored body of a car record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDocument {
    pub make: String,
    pub model: String,
    pub release_date: DateTime<Utc>,
    pub transmission_type: String,
    pub size: String,
    pub style: String,
    pub price: f64,
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
}

impl CarDocument {
    /// Text form of a top-level document field, used for equality filtering.
    /// Strings compare as-is, everything else by its JSON text.
    pub fn field_text(&self, field: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        match value.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn apply(&mut self, patch: &CarPatch) {
        if let Some(make) = &patch.make {
            self.make = make.clone();
        }
        if let Some(model) = &patch.model {
            self.model = model.clone();
        }
        if let Some(release_date) = patch.release_date {
            self.release_date = release_date;
        }
        if let Some(transmission_type) = &patch.transmission_type {
            self.transmission_type = transmission_type.clone();
        }
        if let Some(size) = &patch.size {
            self.size = size.clone();
        }
        if let Some(style) = &patch.style {
            self.style = style.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(is_deleted) = patch.is_deleted {
            self.is_deleted = is_deleted;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    #[serde(flatten)]
    pub document: CarDocument,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Car {
    /// Fresh record with a new id. Timestamps are cut to microseconds, the
    /// precision PostgreSQL keeps, so the returned record matches later reads.
    pub fn new(document: CarDocument) -> Self {
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: Uuid::new_v4(),
            document,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of a create request. Every field is optional at the wire level so that
/// missing values surface as a validation failure rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewCar {
    #[validate(required, length(min = 1))]
    pub make: Option<String>,
    #[validate(required, length(min = 1))]
    pub model: Option<String>,
    #[validate(required)]
    #[serde(default, deserialize_with = "deserialize_release_date")]
    pub release_date: Option<DateTime<Utc>>,
    #[validate(required, length(min = 1))]
    pub transmission_type: Option<String>,
    #[validate(required, length(min = 1))]
    pub size: Option<String>,
    #[validate(required, length(min = 1))]
    pub style: Option<String>,
    #[validate(required)]
    pub price: Option<f64>,
}

impl NewCar {
    /// Names of the fields that are absent or falsy, sorted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.field_errors().keys().copied().collect(),
        };
        if matches!(self.price, Some(p) if p == 0.0 || p.is_nan()) {
            missing.push("price");
        }
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Converts a request that passed `missing_fields` into a fresh document.
    pub fn into_document(self) -> Option<CarDocument> {
        Some(CarDocument {
            make: self.make?,
            model: self.model?,
            release_date: self.release_date?,
            transmission_type: self.transmission_type?,
            size: self.size?,
            style: self.style?,
            price: self.price?,
            is_deleted: false,
        })
    }
}

/// A partial update. Serializes to only the fields that are set, so it can be
/// merged straight into a stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_release_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "isDeleted", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

impl CarPatch {
    pub fn soft_delete() -> Self {
        Self {
            is_deleted: Some(true),
            ..Self::default()
        }
    }
}

/// One page of the car listing.
#[derive(Debug, Clone, Serialize)]
pub struct CarPage {
    pub cars: Vec<Car>,
    pub total: u64,
    pub page: u64,
}
