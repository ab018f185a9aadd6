//! Generic actor framework for reference data.
//!
//! This module provides the building blocks for owning a keyed collection of
//! read-mostly entities inside a Tokio task and querying it from anywhere.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that reference types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the entities
//! - [`ResourceClient`] - Type-safe, cloneable handle for talking to the actor
//! - [`ActorClient`] - Trait giving typed client wrappers a default `get`
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
