use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};

/// Free-form product attributes, always a JSON object.
pub type Specification = serde_json::Map<String, serde_json::Value>;

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_id: Option<String>,
    /// Minor currency units
    pub price: u64,
    pub currency_id: u32,
    pub rating: u32,
    pub category_id: u32,
    pub specification: Specification,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a product; identity and timestamps are assigned by [`Product::new`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub image_id: Option<String>,
    pub price: u64,
    pub currency_id: u32,
    pub rating: u32,
    pub category_id: u32,
    pub specification: Specification,
}

/// Partial update; `None` leaves the current value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_id: Option<String>,
    pub price: Option<u64>,
    pub currency_id: Option<u32>,
    pub rating: Option<u32>,
    pub category_id: Option<u32>,
    pub specification: Option<Specification>,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: input.name,
            description: input.description,
            image_id: input.image_id,
            price: input.price,
            currency_id: input.currency_id,
            rating: input.rating,
            category_id: input.category_id,
            specification: input.specification,
            created_at: now(),
            updated_at: None,
        }
    }

    /// Overwrite the fields present in `patch` and stamp `updated_at`.
    pub fn apply_update(&mut self, patch: UpdateProduct) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image_id) = patch.image_id {
            self.image_id = Some(image_id);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(currency_id) = patch.currency_id {
            self.currency_id = currency_id;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(specification) = patch.specification {
            self.specification = specification;
        }
        self.updated_at = Some(now());
    }
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// PostgreSQL keeps microseconds; truncating up front keeps a stored product
/// equal to its in-memory original.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Parse the wire text of a specification.
///
/// An empty string is an empty specification. Anything else must be a JSON object.
pub fn parse_specification(raw: &str) -> ProductResult<Specification> {
    if raw.trim().is_empty() {
        return Ok(Specification::new());
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(ProductError::Validation(format!(
            "specification must be a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(ProductError::Validation(format!(
            "specification is not valid JSON: {e}"
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
