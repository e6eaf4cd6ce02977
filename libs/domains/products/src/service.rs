use std::sync::Arc;

use tracing::instrument;

use crate::criteria::{Criteria, Sortable};
use crate::dao::ProductDao;
use crate::error::{ProductResult, ResultExt};
use crate::models::Product;

/// Product lifecycle on top of a [`ProductDao`].
///
/// Every call is one storage round trip plus translation; errors from the DAO
/// come back wrapped with the name of the DAO call that failed.
pub struct ProductService<D: ProductDao> {
    dao: Arc<D>,
}

impl<D: ProductDao> Clone for ProductService<D> {
    fn clone(&self) -> Self {
        Self {
            dao: Arc::clone(&self.dao),
        }
    }
}

impl<D: ProductDao> ProductService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao: Arc::new(dao) }
    }

    #[instrument(skip(self, criteria, sort))]
    pub async fn all(
        &self,
        criteria: &[Box<dyn Criteria>],
        sort: &dyn Sortable,
    ) -> ProductResult<Vec<Product>> {
        let rows = self.dao.all(criteria, sort).await.context("repository.all")?;
        rows.into_iter()
            .map(Product::try_from)
            .collect::<ProductResult<Vec<_>>>()
            .context("repository.all")
    }

    /// Persist `product` and hand it back unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn create(&self, product: Product) -> ProductResult<Product> {
        let fields = product.to_field_map()?;
        self.dao.create(fields).await.context("repository.create")?;
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn one(&self, id: &str) -> ProductResult<Product> {
        let row = self.dao.one(id).await.context("repository.one")?;
        Product::try_from(row).context("repository.one")
    }

    /// Write every column of `product` over the stored row with the same id.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn update(&self, product: &Product) -> ProductResult<()> {
        let fields = product.to_field_map()?;
        self.dao
            .update(&product.id, fields)
            .await
            .context("repository.update")
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductResult<()> {
        self.dao.delete(id).await.context("repository.delete")
    }
}
