//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Lookups come from [`ActorClient::get`](crate::framework::ActorClient::get);
//! each wrapper adds registration and its own error type.

pub mod customer_client;
pub mod product_client;

pub use customer_client::*;
pub use product_client::*;
