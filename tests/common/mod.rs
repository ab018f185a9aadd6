#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use sales_service::cache::{Cache, CacheError};
use sales_service::clients::{CustomerClient, ProductClient};
use sales_service::customer_actor;
use sales_service::model::{
    CustomerCreate, CustomerId, NewOrder, Order, OrderId, ProductCreate, ProductId,
};
use sales_service::product_actor;
use sales_service::store::{OrderStore, StoreError};
use std::time::Duration as StdDuration;

/// Spawns real reference actors holding the two seed customers and products.
pub async fn seeded_clients() -> (CustomerClient, ProductClient) {
    let (customer_actor, customers) = customer_actor::new();
    let (product_actor, products) = product_actor::new();
    tokio::spawn(customer_actor.run());
    tokio::spawn(product_actor.run());

    for (name, phone) in [("João", "99999-0001"), ("Maria", "99999-0002")] {
        customers
            .register(CustomerCreate {
                name: name.into(),
                phone: phone.into(),
            })
            .await
            .unwrap();
    }
    for (name, unit_value) in [("Product A", 10.0), ("Product B", 20.0)] {
        products
            .register(ProductCreate {
                name: name.into(),
                description: format!("Description {}", &name[8..]),
                unit_value,
            })
            .await
            .unwrap();
    }
    (customers, products)
}

/// An order as the store would return it, created `minutes` after a fixed instant.
pub fn stored_order(id: i64, customer: u32, product: u32, minutes: i64) -> Order {
    NewOrder {
        customer_id: CustomerId(customer),
        product_id: ProductId(product),
        quantity: 1,
        total_value: 10.0,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes),
    }
    .into_order(OrderId(id))
}

/// A store that answers `list_recent` with fixed orders and rejects writes.
pub struct FixedStore(pub Vec<Order>);

#[async_trait]
impl OrderStore for FixedStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }
    async fn insert(&self, _: NewOrder) -> Result<Order, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn list_recent(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.0.clone())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl OrderStore for FailingStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn insert(&self, _: NewOrder) -> Result<Order, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn list_recent(&self) -> Result<Vec<Order>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// A cache whose every call fails.
pub struct FailingCache;

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }
    async fn set(&self, _: &str, _: &str, _: StdDuration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }
    async fn delete(&self, _: &str) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }
    async fn publish(&self, _: &str, _: &str) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }
}
