//! Entity trait implementation for the Customer model type.
//!
//! See the trait implementation on [`Customer`] for method documentation.

use super::CustomerError;
use crate::framework::ActorEntity;
use crate::model::{Customer, CustomerCreate, CustomerId};

impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Error = CustomerError;

    /// Creates a new Customer from creation parameters.
    ///
    /// Both the name and the phone must be non-blank.
    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, CustomerError> {
        if params.name.trim().is_empty() {
            return Err(CustomerError::ValidationError("name is required".into()));
        }
        if params.phone.trim().is_empty() {
            return Err(CustomerError::ValidationError("phone is required".into()));
        }
        Ok(Self::new(id, params.name, params.phone))
    }
}
