//! # Product Service
//!
//! Request handling for the product resource: Create, Read, Update and Delete.
//!
//! ## Structure
//!
//! - [`service`] - [`ProductService`], the four handlers over an injected [`ProductStore`](crate::store::ProductStore)
//! - [`input`] - [`ProductInput`], caller-supplied fields and their validation
//! - [`deadline`] - [`Deadline`], the per-request budget every store call runs under
//! - [`error`] - [`ProductError`], the error taxonomy and its gRPC status mapping
//! - [`grpc`] - the tonic adapter for `product.ProductService`
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (collection, store) = MemoryCollection::new(32);
//! tokio::spawn(collection.run());
//!
//! let service = ProductService::new(Arc::new(store), CacheSideEffect::disabled(), Duration::from_secs(10));
//! let product = service.create(input, service.default_deadline()).await?;
//! let same = service.read(&product.id.format(), service.default_deadline()).await?;
//! ```
//!
//! ## Consistency
//!
//! Update and Delete check existence first, then mutate. The two steps are separate store
//! calls, so each mutation also checks its own matched/deleted count and reports
//! `NotFound` when another request got there first.

pub mod deadline;
pub mod error;
pub mod grpc;
pub mod input;
pub mod service;

pub use deadline::*;
pub use error::*;
pub use input::*;
pub use service::*;
