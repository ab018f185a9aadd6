//! Error types for the order service.

use crate::customer_actor::CustomerError;
use crate::model::{CustomerId, OrderId, ProductId};
use crate::product_actor::ProductError;
use crate::store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while listing or creating orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request is malformed: a field is missing or the quantity is not positive.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The order store failed to read or write.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// A customer or product lookup exceeded the configured deadline.
    #[error("Lookup of {what} timed out after {after:?}")]
    LookupTimeout { what: &'static str, after: Duration },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// A listing could not be enriched under the strict policy.
    #[error("Enrichment failed for {order_id}: {reason}")]
    Enrichment { order_id: OrderId, reason: String },
}

impl From<CustomerError> for OrderError {
    fn from(e: CustomerError) -> Self {
        OrderError::ActorCommunicationError(e.to_string())
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        OrderError::ActorCommunicationError(e.to_string())
    }
}
