//! In-process [`OrderStore`].

use super::{OrderStore, StoreError};
use crate::model::{NewOrder, Order, OrderId};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Inner {
    orders: Vec<Order>,
    next_id: i64,
}

/// An [`OrderStore`] kept in memory.
///
/// IDs start at 1 and increase with every insert, like a `BIGSERIAL` column.
#[derive(Default)]
pub struct InMemoryOrderStore {
    inner: Mutex<Inner>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders written so far.
    pub fn len(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let mut order = order.into_order(OrderId(inner.next_id));
        order.total_value = (order.total_value * 100.0).round() / 100.0;
        inner.orders.push(order.clone());
        Ok(order)
    }

    async fn list_recent(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders = self.lock().orders.clone();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(orders)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
