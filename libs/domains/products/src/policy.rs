//! Authorization seam in front of [`ProductService`].
//!
//! [`ProductPolicy`] consults a [`PolicyRule`] before forwarding each call.
//! The default rule, [`PassThrough`], permits everything, so the policy layer
//! currently adds no behavior of its own.

use tracing::instrument;

use crate::criteria::{Criteria, Sortable};
use crate::dao::ProductDao;
use crate::error::ProductResult;
use crate::models::Product;
use crate::service::ProductService;

/// The operation a caller is about to perform.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    List,
    Read { id: &'a str },
    Create { product: &'a Product },
    Update { product: &'a Product },
    Delete { id: &'a str },
}

/// Decides whether an [`Action`] may proceed.
///
/// Returning an error stops the call before it reaches the service.
pub trait PolicyRule: Send + Sync {
    fn check(&self, action: &Action<'_>) -> ProductResult<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl PolicyRule for PassThrough {
    fn check(&self, _action: &Action<'_>) -> ProductResult<()> {
        Ok(())
    }
}

pub struct ProductPolicy<D: ProductDao, R: PolicyRule = PassThrough> {
    service: ProductService<D>,
    rule: R,
}

impl<D: ProductDao> ProductPolicy<D> {
    pub fn new(service: ProductService<D>) -> Self {
        Self::with_rule(service, PassThrough)
    }
}

impl<D: ProductDao, R: PolicyRule> ProductPolicy<D, R> {
    pub fn with_rule(service: ProductService<D>, rule: R) -> Self {
        Self { service, rule }
    }

    #[instrument(skip_all)]
    pub async fn all(
        &self,
        criteria: &[Box<dyn Criteria>],
        sort: &dyn Sortable,
    ) -> ProductResult<Vec<Product>> {
        self.rule.check(&Action::List)?;
        self.service.all(criteria, sort).await
    }

    #[instrument(skip_all, fields(product_id = %product.id))]
    pub async fn create(&self, product: Product) -> ProductResult<Product> {
        self.rule.check(&Action::Create { product: &product })?;
        self.service.create(product).await
    }

    #[instrument(skip(self))]
    pub async fn one(&self, id: &str) -> ProductResult<Product> {
        self.rule.check(&Action::Read { id })?;
        self.service.one(id).await
    }

    #[instrument(skip_all, fields(product_id = %product.id))]
    pub async fn update(&self, product: &Product) -> ProductResult<()> {
        self.rule.check(&Action::Update { product })?;
        self.service.update(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductResult<()> {
        self.rule.check(&Action::Delete { id })?;
        self.service.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Sort;
    use crate::dao::MockProductDao;
    use crate::error::ProductError;
    use crate::models::CreateProduct;

    /// Rejects deletes, lets everything else through.
    struct ReadWriteOnly;

    impl PolicyRule for ReadWriteOnly {
        fn check(&self, action: &Action<'_>) -> ProductResult<()> {
            match action {
                Action::Delete { id } => Err(ProductError::Validation(format!(
                    "deleting {id} is not allowed"
                ))),
                _ => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn test_pass_through_forwards_every_call() {
        let mut dao = MockProductDao::new();
        dao.expect_all().times(1).returning(|_, _| Ok(vec![]));
        dao.expect_create().times(1).returning(|_| Ok(()));
        dao.expect_update().times(1).returning(|_, _| Ok(()));
        dao.expect_delete().times(1).returning(|_| Ok(()));
        dao.expect_one()
            .times(1)
            .returning(|id| Err(ProductError::NotFound(id.to_string())));

        let policy = ProductPolicy::new(ProductService::new(dao));
        let product = Product::new(CreateProduct::default());

        assert!(policy.all(&[], &Sort::unsorted()).await.unwrap().is_empty());
        assert_eq!(policy.create(product.clone()).await.unwrap(), product);
        policy.update(&product).await.unwrap();
        policy.delete(&product.id).await.unwrap();
        assert!(matches!(
            policy.one("nope").await.unwrap_err().root(),
            ProductError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_rule_can_stop_a_call() {
        let mut dao = MockProductDao::new();
        dao.expect_delete().never();

        let policy = ProductPolicy::with_rule(ProductService::new(dao), ReadWriteOnly);
        let err = policy.delete("p-1").await.unwrap_err();
        assert!(err.to_string().contains("not allowed"));
    }
}
