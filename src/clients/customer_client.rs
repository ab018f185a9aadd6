//! # Customer Client
//!
//! Provides a high‑level API for interacting with the `Customer` actor.
use crate::customer_actor::CustomerError;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Customer, CustomerCreate, CustomerId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }

    /// Registers a customer and returns the ID the actor assigned.
    #[instrument(skip(self))]
    pub async fn register(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<CustomerError>() {
                Ok(error) => *error,
                Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
            },
            other => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[tokio::test]
    async fn test_register_surfaces_validation_error() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                CustomerError::ValidationError("name is required".into()),
            )));

        let client = CustomerClient::new(mock.client());
        let result = client
            .register(CustomerCreate {
                name: String::new(),
                phone: "99999-0001".into(),
            })
            .await;

        assert_eq!(
            result,
            Err(CustomerError::ValidationError("name is required".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_get(CustomerId(1))
            .return_err(FrameworkError::ActorClosed);

        let client = CustomerClient::new(mock.client());
        let result = client.get(CustomerId(1)).await;

        assert!(matches!(
            result,
            Err(CustomerError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
