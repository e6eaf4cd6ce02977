//! Products Domain
//!
//! Catalog products persisted in PostgreSQL and exposed over gRPC.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Policy    │  ← Authorization seam (PolicyRule, PassThrough by default)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Lifecycle operations, translation between layers
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │     Dao     │  ← Statements built from Criteria + Sortable, raw execution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← Storage row of the `product` table
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{PgProductDao, ProductPolicy, ProductService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = ProductService::new(PgProductDao::new(db));
//! let policy = ProductPolicy::new(service);
//! let everything = policy.all(&[], &domain_products::Sort::unsorted()).await?;
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod criteria;
pub mod dao;
pub mod entity;
pub mod error;
pub mod models;
pub mod policy;
pub mod postgres;
pub mod service;

pub use criteria::{CategoryCriteria, Criteria, Sort, SortOrder, Sortable};
pub use dao::{FieldMap, ProductDao};
pub use error::{ProductError, ProductResult, ResultExt};
pub use models::{CreateProduct, Product, Specification, UpdateProduct};
pub use policy::{Action, PassThrough, PolicyRule, ProductPolicy};
pub use postgres::PgProductDao;
pub use service::ProductService;
