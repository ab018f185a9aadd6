//! # Customer Actor
//!
//! Owns the customers known to the service. Customers are registered once at
//! startup and then only looked up, by the write path and by listing enrichment.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Customer`]
//! - [`error`] - [`CustomerError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use sales_service::customer_actor;
//! use sales_service::framework::ActorClient;
//! use sales_service::model::{CustomerCreate, CustomerId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = customer_actor::new();
//!     tokio::spawn(actor.run());
//!
//!     let id = client
//!         .register(CustomerCreate {
//!             name: "João".to_string(),
//!             phone: "99999-0001".to_string(),
//!         })
//!         .await?;
//!     assert_eq!(id, CustomerId(1));
//!
//!     let customer = client.get(id).await?.expect("registered");
//!     assert_eq!(customer.phone, "99999-0001");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::framework::ResourceActor;
use crate::model::Customer;

/// Creates a new Customer actor and its client.
pub fn new() -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    let client = CustomerClient::new(generic_client);

    (actor, client)
}
