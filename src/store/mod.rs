//! # Order Store
//!
//! Durable persistence for orders, the source of truth behind the listing cache.
//!
//! - [`PgOrderStore`] - Postgres via `sqlx`, used by the service binary.
//! - [`InMemoryOrderStore`] - process-local store with the same ordering rules,
//!   used by tests and local runs.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryOrderStore;
pub use postgres::PgOrderStore;

use crate::model::{NewOrder, Order};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by an [`OrderStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected the statement or could not be reached.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into an [`Order`].
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Persistence contract for orders.
///
/// Implementations are shared by every request handler, so they must be safe
/// for concurrent use.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Creates the orders table if it does not exist yet.
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// Writes a new order and returns it with its store-assigned ID.
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Returns every order, newest first. Orders created at the same instant
    /// are returned highest ID first.
    async fn list_recent(&self) -> Result<Vec<Order>, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
