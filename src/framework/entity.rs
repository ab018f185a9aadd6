//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a reference resource (Customer, Product, ...)
//! implements to be owned by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! # Architecture Note
//! The actor loop is written *once* and reused for every reference type. Associated
//! types keep each actor honest: a `Customer` actor only accepts a `CustomerCreate`
//! payload, and the compiler rejects a `ProductCreate` sent its way.
//!
//! Reference data in this service is immutable once registered, so the contract
//! only covers construction. Lookups are answered by the actor itself.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any reference entity must implement to be managed by `ResourceActor`.
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from `u32` for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to register a new instance.
    type Create: Send + Sync + Debug;

    /// The error type for this entity.
    ///
    /// One error enum per actor, shared by every operation on it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the assigned ID and the payload.
    ///
    /// Validation belongs here: a payload rejected by this function never
    /// reaches the actor's store.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;
}
