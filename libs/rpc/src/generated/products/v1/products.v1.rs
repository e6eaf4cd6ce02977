// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Product {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "4")]
    pub image_id: ::core::option::Option<::prost::alloc::string::String>,
    /// Minor currency units.
    #[prost(uint64, tag = "5")]
    pub price: u64,
    #[prost(uint32, tag = "6")]
    pub currency_id: u32,
    #[prost(uint32, tag = "7")]
    pub rating: u32,
    #[prost(uint32, tag = "8")]
    pub category_id: u32,
    /// JSON object encoded as text.
    #[prost(string, tag = "9")]
    pub specification: ::prost::alloc::string::String,
    /// Milliseconds since the Unix epoch, 0 when never updated.
    #[prost(int64, tag = "10")]
    pub updated_at: i64,
    #[prost(int64, tag = "11")]
    pub created_at: i64,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Sort {
    #[prost(string, tag = "1")]
    pub field: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub order: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct AllProductsRequest {
    #[prost(string, optional, tag = "1")]
    pub category_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "2")]
    pub sort: ::core::option::Option<Sort>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct AllProductsResponse {
    #[prost(message, repeated, tag = "1")]
    pub products: ::prost::alloc::vec::Vec<Product>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProductByIdRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ProductByIdResponse {
    #[prost(message, optional, tag = "1")]
    pub product: ::core::option::Option<Product>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct CreateProductRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "3")]
    pub image_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(uint64, tag = "4")]
    pub price: u64,
    #[prost(uint32, tag = "5")]
    pub currency_id: u32,
    #[prost(uint32, tag = "6")]
    pub rating: u32,
    #[prost(uint32, tag = "7")]
    pub category_id: u32,
    #[prost(string, tag = "8")]
    pub specification: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct CreateProductResponse {
    #[prost(message, optional, tag = "1")]
    pub product: ::core::option::Option<Product>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct UpdateProductRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, optional, tag = "2")]
    pub name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "3")]
    pub description: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "4")]
    pub image_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(uint64, optional, tag = "5")]
    pub price: ::core::option::Option<u64>,
    #[prost(uint32, optional, tag = "6")]
    pub currency_id: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "7")]
    pub rating: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "8")]
    pub category_id: ::core::option::Option<u32>,
    #[prost(string, optional, tag = "9")]
    pub specification: ::core::option::Option<::prost::alloc::string::String>,
}
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct UpdateProductResponse {}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct DeleteProductRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct DeleteProductResponse {}
