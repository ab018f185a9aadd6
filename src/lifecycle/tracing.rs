//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The filter comes from `RUST_LOG`; without it the service logs at `info`
//! and keeps `sqlx` at `warn`. Output is compact and hides the module prefix
//! (`with_target(false)`), so lines stay short while still carrying
//! structured fields.
//!
//! ```bash
//! # Default
//! cargo run
//!
//! # Show request payloads and every actor lookup
//! RUST_LOG=debug cargo run
//!
//! # Only the worker pool
//! RUST_LOG=sales_service::jobs=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, registrations and shutdown of the reference actors
//! - **Write Path**: `create_order` spans carrying `customer_id` and `product_id`,
//!   the persisted `order_id` and `total_value`
//! - **Read Path**: whether a listing came from `cache` or `store`, and orders
//!   listed without full details
//! - **Workers**: start, processed jobs, drained jobs on shutdown
//! - **Swallowed Failures**: cache and publication errors at `warn`
//!
//! With `RUST_LOG=info` a single order reads:
//!
//! ```text
//! INFO create_order: Order created order_id=order_1 total_value=30.0 customer_id=customer_1 product_id=product_1
//! INFO process: Order processed channel=orders:processed customer_id=customer_1 product_id=product_1
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
