//! Startup, configuration and shutdown of the service process.

pub mod config;
pub mod product_system;
pub mod tracing;

pub use self::config::*;
pub use self::product_system::*;
pub use self::tracing::*;
