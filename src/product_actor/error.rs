//! Error types for the Product actor.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// The unit value is negative or not a finite number.
    #[error("Invalid unit value: {0}")]
    InvalidUnitValue(f64),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
