use crate::constants::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::config::default_filter_keys;
use crate::error::AppError;
use crate::repository::CarQuery;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Which query keys a car listing accepts besides `page` and `limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPolicy {
    allowed_keys: Vec<String>,
}

impl ListPolicy {
    pub fn new(allowed_keys: Vec<String>) -> Self {
        Self { allowed_keys }
    }

    pub fn allows(&self, key: &str) -> bool {
        self.allowed_keys.iter().any(|allowed| allowed == key)
    }
}

impl Default for ListPolicy {
    fn default() -> Self {
        Self::new(default_filter_keys())
    }
}

/// A validated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u64,
    pub limit: u64,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Splits raw query parameters into paging controls and equality filters.
    /// Keys outside the policy are rejected; keys with an empty value are dropped.
    pub fn parse(
        mut params: BTreeMap<String, String>,
        policy: &ListPolicy,
    ) -> Result<Self, AppError> {
        let page = params
            .remove("page")
            .and_then(|raw| parse_positive_int(&raw))
            .unwrap_or(DEFAULT_PAGE);
        let limit = params
            .remove("limit")
            .and_then(|raw| parse_positive_int(&raw))
            .unwrap_or(DEFAULT_LIMIT);

        if let Some(key) = params.keys().find(|key| !policy.allows(key)) {
            return Err(AppError::Validation(format!("Query {} is not allowed", key)));
        }
        params.retain(|_, value| !value.is_empty());

        Ok(Self {
            page,
            limit,
            filters: params,
        })
    }

    pub fn offset(&self) -> u64 {
        self.limit.saturating_mul(self.page - 1)
    }

    pub fn to_store_query(&self) -> CarQuery {
        CarQuery {
            filters: self.filters.clone(),
            offset: self.offset(),
            limit: self.limit,
        }
    }

    /// Page count reported to clients. Based on the size of the whole
    /// collection, not on the number of filtered matches.
    pub fn total_pages(&self, collection_size: u64) -> u64 {
        collection_size.div_ceil(self.limit)
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits; trailing
/// text is ignored. Zero, negative and unparsable input yield `None`.
fn parse_positive_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: u64 = rest[..digits_end].parse().ok()?;
    if negative || value == 0 {
        return None;
    }
    Some(value)
}

/// Validates a car identifier taken from the request path.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("Id is not null".to_string()));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("Id type is invalid".to_string()))
}
