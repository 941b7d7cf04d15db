//! Type-safe wrapper around the generated gRPC client.

pub mod product_client;

pub use product_client::*;
