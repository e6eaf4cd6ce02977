//! Translation between the three shapes of a product:
//!
//! - wire messages (`rpc::products::v1`)
//! - the domain [`Product`]
//! - the storage row ([`entity::Model`]) and the [`FieldMap`] used for writes
//!
//! Unsigned domain integers are stored in signed columns. Values that do not
//! fit are rejected on the way in (validation) and on the way out (decode).

use rpc::products::v1 as pb;
use sea_orm::{IdenStatic, Value};
use tracing::warn;

use crate::criteria::{CategoryCriteria, Criteria, Sort};
use crate::dao::FieldMap;
use crate::entity::{self, Column};
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, Specification, UpdateProduct, parse_specification};

// ============================================================================
// Storage
// ============================================================================

impl Product {
    /// Every column of the product, keyed by column name.
    ///
    /// Writes always send the whole map; there is no per-field selection.
    pub fn to_field_map(&self) -> ProductResult<FieldMap> {
        let entries: [(Column, Value); 11] = [
            (Column::Id, self.id.clone().into()),
            (Column::Name, self.name.clone().into()),
            (Column::Description, self.description.clone().into()),
            (Column::ImageId, self.image_id.clone().into()),
            (Column::Price, to_signed::<i64>("price", self.price)?.into()),
            (Column::CurrencyId, to_signed::<i32>("currency_id", self.currency_id)?.into()),
            (Column::Rating, to_signed::<i32>("rating", self.rating)?.into()),
            (Column::CategoryId, to_signed::<i32>("category_id", self.category_id)?.into()),
            (
                Column::Specification,
                serde_json::Value::Object(self.specification.clone()).into(),
            ),
            (Column::CreatedAt, self.created_at.into()),
            (Column::UpdatedAt, self.updated_at.into()),
        ];

        Ok(entries
            .into_iter()
            .map(|(column, value)| (column.as_str().to_string(), value))
            .collect())
    }
}

fn to_signed<T>(field: &str, value: impl TryInto<T> + Copy + std::fmt::Display) -> ProductResult<T> {
    value.try_into().map_err(|_| {
        ProductError::Validation(format!("{field} {value} exceeds the storable range"))
    })
}

impl TryFrom<entity::Model> for Product {
    type Error = ProductError;

    fn try_from(model: entity::Model) -> Result<Self, Self::Error> {
        let id = model.id;
        let unsigned = |field: &str, value: i64| {
            u64::try_from(value).map_err(|_| ProductError::Decode {
                origin: format!("product row {id}"),
                reason: format!("{field} is negative ({value})"),
            })
        };

        let price = unsigned("price", model.price)?;
        let currency_id = unsigned("currency_id", model.currency_id.into())? as u32;
        let rating = unsigned("rating", model.rating.into())? as u32;
        let category_id = unsigned("category_id", model.category_id.into())? as u32;

        let specification = match model.specification {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => Specification::new(),
            other => {
                return Err(ProductError::Decode {
                    origin: format!("product row {id}"),
                    reason: format!("specification is not a JSON object: {other}"),
                });
            }
        };

        Ok(Self {
            id,
            name: model.name,
            description: model.description,
            image_id: model.image_id,
            price,
            currency_id,
            rating,
            category_id,
            specification,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

// ============================================================================
// Wire
// ============================================================================

impl From<Product> for pb::Product {
    fn from(product: Product) -> Self {
        let specification = serde_json::to_string(&product.specification).unwrap_or_else(|e| {
            warn!(product_id = %product.id, error = %e, "failed to serialize specification");
            String::new()
        });

        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            image_id: product.image_id,
            price: product.price,
            currency_id: product.currency_id,
            rating: product.rating,
            category_id: product.category_id,
            specification,
            updated_at: product.updated_at.map_or(0, |at| at.timestamp_millis()),
            created_at: product.created_at.timestamp_millis(),
        }
    }
}

impl TryFrom<pb::CreateProductRequest> for CreateProduct {
    type Error = ProductError;

    fn try_from(req: pb::CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            specification: parse_specification(&req.specification)?,
            name: req.name,
            description: req.description,
            image_id: req.image_id,
            price: req.price,
            currency_id: req.currency_id,
            rating: req.rating,
            category_id: req.category_id,
        })
    }
}

impl TryFrom<pb::UpdateProductRequest> for UpdateProduct {
    type Error = ProductError;

    fn try_from(req: pb::UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            specification: req
                .specification
                .as_deref()
                .map(parse_specification)
                .transpose()?,
            name: req.name,
            description: req.description,
            image_id: req.image_id,
            price: req.price,
            currency_id: req.currency_id,
            rating: req.rating,
            category_id: req.category_id,
        })
    }
}

/// Filters and ordering decoded from an `AllProducts` request.
#[derive(Debug, Default)]
pub struct ProductQuery {
    pub criteria: Vec<Box<dyn Criteria>>,
    pub sort: Sort,
}

impl TryFrom<pb::AllProductsRequest> for ProductQuery {
    type Error = ProductError;

    fn try_from(req: pb::AllProductsRequest) -> Result<Self, Self::Error> {
        let category = match req.category_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                ProductError::Validation(format!(
                    "category_id must be a non-negative integer, got '{raw}'"
                ))
            })?),
        };

        let sort = match req.sort {
            Some(sort) => Sort::parse(&sort.field, &sort.order)?,
            None => Sort::unsorted(),
        };

        Ok(Self {
            criteria: vec![Box::new(CategoryCriteria::new(category))],
            sort,
        })
    }
}
