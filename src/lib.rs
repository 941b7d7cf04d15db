//! # Product Service
//!
//! > **A gRPC CRUD service for a product catalog over a document store.**
//!
//! Four operations (Create, Read, Update, Delete) on a single resource, each backed by a
//! single-document store call, with a best-effort snapshot written to an expiring cache
//! after every successful read.
//!
//! ## Architecture Notes
//!
//! ### 1. Ports, not drivers
//! Handlers reach persistence through the [`ProductStore`](store::ProductStore) trait and
//! the cache through [`ProductCache`](cache::ProductCache). Both are injected as
//! `Arc<dyn ...>`, so tests run the real handlers against a
//! [`MockStore`](store::mock::MockStore) or an in-memory collection actor.
//!
//! ### 2. Type-Safe Error Handling
//! Each layer has its own error enum (`StoreError`, `CacheError`, `ProductError`,
//! `ClientError`, `LifecycleError`). Handler errors map to gRPC status codes in one place,
//! [`From<ProductError> for Status`](product_service::ProductError).
//!
//! ### 3. Concurrency Model
//! Every request runs on its own task and shares nothing mutable with other requests.
//! Store calls race a per-request [`Deadline`](product_service::Deadline). Cache writes run
//! detached and never hold up the response.
//!
//! ### 4. Observability
//! `tracing` everywhere, one span per request. See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`model`]: [`ProductId`](model::ProductId), [`Price`](model::Price),
//!   [`Product`](model::Product)
//! - [`store`]: the store port, the MongoDB gateway, the memory actor and the mock
//! - [`cache`]: the read snapshot side-effect and its Redis adapter
//! - [`product_service`]: validation, the four handlers and the tonic adapter
//! - [`clients`]: [`ProductClient`](clients::ProductClient) for calling a running server
//! - [`lifecycle`]: configuration, tracing setup, startup and shutdown
//!
//! ## Quick Start
//!
//! ```bash
//! # Against a local MongoDB, with caching
//! REDIS_URL=redis://127.0.0.1:6379 cargo run --bin product-service
//!
//! # No external services
//! cargo run --bin product-service -- --store memory
//!
//! # Drive Create, Read, Update, Delete against it
//! cargo run --bin product-demo
//! ```

pub mod cache;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod product_service;
pub mod store;

/// Types generated from `proto/product.proto`.
pub mod proto {
    tonic::include_proto!("product");
}
