//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber once, at the top of each binary.
//!
//! ## Configuration
//!
//! Compact format with the module prefix hidden (`with_target(false)`). Level filtering
//! comes from `RUST_LOG`; without it the service logs at `info`.
//!
//! ```bash
//! # Default
//! cargo run --bin product-service
//!
//! # Store calls and actor messages
//! RUST_LOG=debug cargo run --bin product-service -- --store memory
//!
//! # Only this crate at debug, dependencies at warn
//! RUST_LOG=warn,product_service=debug cargo run --bin product-service
//! ```
//!
//! ## What Gets Traced
//!
//! - **Lifecycle**: store and cache connections, listener address, shutdown
//! - **Handlers**: one span per request (`create`, `read`, `update`, `delete`) carrying the
//!   product id or name
//! - **Store**: collection actor startup and shutdown, each request at `debug`
//! - **Failures**: store errors and cache write failures at `warn`
//!
//! A read against the memory store with `RUST_LOG=debug` looks like:
//!
//! ```text
//! DEBUG read{id="61cb2b463f79f2a6eeb96f94"}: Find id=61cb2b463f79f2a6eeb96f94
//! DEBUG Cached key=product:61cb2b463f79f2a6eeb96f94 ttl_secs=15
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
