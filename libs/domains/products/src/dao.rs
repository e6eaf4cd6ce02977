use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::criteria::{Criteria, Sortable};
use crate::entity;
use crate::error::ProductResult;

/// Column name → value, the complete set of columns a write touches.
pub type FieldMap = BTreeMap<String, sea_orm::Value>;

/// Storage gateway for the `product` table.
///
/// Every call is a single statement round trip. Mutations that match no row
/// fail with [`ProductError::NoRowsAffected`](crate::ProductError::NoRowsAffected).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductDao: Send + Sync {
    /// Rows matching every criteria, ordered by `sort`. No match is an empty vec.
    async fn all<'a>(
        &self,
        criteria: &'a [Box<dyn Criteria>],
        sort: &'a (dyn Sortable + 'a),
    ) -> ProductResult<Vec<entity::Model>>;

    async fn one(&self, id: &str) -> ProductResult<entity::Model>;

    async fn create(&self, fields: FieldMap) -> ProductResult<()>;

    async fn update(&self, id: &str, fields: FieldMap) -> ProductResult<()>;

    async fn delete(&self, id: &str) -> ProductResult<()>;
}
