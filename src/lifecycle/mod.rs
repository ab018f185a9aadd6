//! Process lifecycle: wiring the service together and observability.

pub mod sales_system;
pub mod tracing;

pub use self::sales_system::{SalesSystem, SystemError};
pub use self::tracing::setup_tracing;
