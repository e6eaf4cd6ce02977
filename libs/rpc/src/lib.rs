//! Checked-in protobuf and gRPC bindings.
//!
//! Regenerate with `buf generate` from this crate's directory after editing
//! `proto/products/v1/products.proto`.

pub mod products {
    pub mod v1 {
        include!("generated/products/v1/products.v1.rs");
        include!("generated/products/v1/products.v1.tonic.rs");
    }
}
