//! Products gRPC service implementation
//!
//! Handlers only translate: wire → domain via the `TryFrom` impls in
//! `domain_products::conversions`, domain errors → `Status` via
//! `From<ProductError>`.

use std::sync::Arc;

use domain_products::conversions::ProductQuery;
use domain_products::{
    CreateProduct, PassThrough, PolicyRule, Product, ProductDao, ProductPolicy, UpdateProduct,
};
use rpc::products::v1::product_service_server::ProductService;
use rpc::products::v1::{
    AllProductsRequest, AllProductsResponse, CreateProductRequest, CreateProductResponse,
    DeleteProductRequest, DeleteProductResponse, ProductByIdRequest, ProductByIdResponse,
    UpdateProductRequest, UpdateProductResponse,
};
use tonic::{Request, Response, Status};
use tracing::{debug, info, instrument};

/// gRPC service implementation for products
///
/// Generic over the DAO so handlers can be exercised without PostgreSQL, and
/// over the [`PolicyRule`] consulted before each call.
pub struct ProductServiceImpl<D, R = PassThrough>
where
    D: ProductDao + 'static,
    R: PolicyRule + 'static,
{
    policy: Arc<ProductPolicy<D, R>>,
}

impl<D, R> ProductServiceImpl<D, R>
where
    D: ProductDao + 'static,
    R: PolicyRule + 'static,
{
    pub fn new(policy: ProductPolicy<D, R>) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }
}

#[tonic::async_trait]
impl<D, R> ProductService for ProductServiceImpl<D, R>
where
    D: ProductDao + 'static,
    R: PolicyRule + 'static,
{
    #[instrument(skip_all)]
    async fn all_products(
        &self,
        request: Request<AllProductsRequest>,
    ) -> Result<Response<AllProductsResponse>, Status> {
        let query = ProductQuery::try_from(request.into_inner())?;
        let products = self.policy.all(&query.criteria, &query.sort).await?;
        Ok(Response::new(AllProductsResponse {
            products: products.into_iter().map(Into::into).collect(),
        }))
    }

    #[instrument(skip_all)]
    async fn product_by_id(
        &self,
        request: Request<ProductByIdRequest>,
    ) -> Result<Response<ProductByIdResponse>, Status> {
        let id = request.into_inner().id;
        let product = self.policy.one(&id).await?;
        Ok(Response::new(ProductByIdResponse {
            product: Some(product.into()),
        }))
    }

    #[instrument(skip_all)]
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<CreateProductResponse>, Status> {
        let input = CreateProduct::try_from(request.into_inner())?;
        let product = self.policy.create(Product::new(input)).await?;
        info!(product_id = %product.id, "Created product");
        Ok(Response::new(CreateProductResponse {
            product: Some(product.into()),
        }))
    }

    /// Read-modify-write: absent fields keep their stored values.
    #[instrument(skip_all)]
    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<UpdateProductResponse>, Status> {
        let req = request.into_inner();
        let id = req.id.clone();
        let patch = UpdateProduct::try_from(req)?;
        if patch.is_empty() {
            debug!(product_id = %id, "Update carries no fields, only updated_at changes");
        }

        let mut product = self.policy.one(&id).await?;
        product.apply_update(patch);
        self.policy.update(&product).await?;

        info!(product_id = %id, "Updated product");
        Ok(Response::new(UpdateProductResponse {}))
    }

    #[instrument(skip_all)]
    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<DeleteProductResponse>, Status> {
        let id = request.into_inner().id;
        self.policy.delete(&id).await?;
        info!(product_id = %id, "Deleted product");
        Ok(Response::new(DeleteProductResponse {}))
    }
}
