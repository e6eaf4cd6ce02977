//! Products gRPC Service
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC with Zstd compression)
//! ProductServiceImpl (service.rs)
//!   ↓ (wire ↔ domain via From/TryFrom in domain_products::conversions)
//! ProductPolicy → ProductService (domain layer)
//!   ↓
//! PgProductDao (statements built from Criteria + Sortable)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `server`: configuration, database bootstrap, health reporting, serving
//! - `service`: gRPC handlers (ProductServiceImpl)

pub mod server;
pub mod service;

pub use server::run;
pub use service::ProductServiceImpl;
