//! Postgres-backed [`OrderStore`].

use super::{OrderStore, StoreError};
use crate::config::PostgresConfig;
use crate::model::{CustomerId, NewOrder, Order, OrderId, ProductId};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use tracing::{debug, info, instrument};

const CREATE_ORDERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        customer_id BIGINT NOT NULL,
        product_id BIGINT NOT NULL,
        quantity BIGINT NOT NULL,
        total_value NUMERIC(10, 2) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

/// Order store on a `sqlx` connection pool.
///
/// Totals are stored as `NUMERIC(10, 2)`, so they are rounded to cents on
/// write and read back as `f64`.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the first connection cannot be established.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;
        info!(max_connections = config.max_connections, "Connected to Postgres");
        Ok(Self::new(pool))
    }

    fn decode(row: &PgRow) -> Result<Order, StoreError> {
        let customer_id: i64 = row.try_get("customer_id")?;
        let product_id: i64 = row.try_get("product_id")?;
        let quantity: i64 = row.try_get("quantity")?;

        Ok(Order {
            id: OrderId(row.try_get("id")?),
            customer_id: CustomerId(narrow(customer_id, "customer_id")?),
            product_id: ProductId(narrow(product_id, "product_id")?),
            quantity: narrow(quantity, "quantity")?,
            total_value: row.try_get("total_value")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

fn narrow(value: i64, column: &str) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::Decode(format!("{column} out of range: {value}")))
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ORDERS_TABLE).execute(&self.pool).await?;
        info!("Orders schema ready");
        Ok(())
    }

    #[instrument(skip(self, order), fields(customer_id = %order.customer_id, product_id = %order.product_id))]
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let row = sqlx::query(
            "INSERT INTO orders (customer_id, product_id, quantity, total_value, created_at)
             VALUES ($1, $2, $3, CAST($4::FLOAT8 AS NUMERIC(10, 2)), $5)
             RETURNING id, customer_id, product_id, quantity, total_value::FLOAT8 AS total_value, created_at",
        )
        .bind(i64::from(order.customer_id.0))
        .bind(i64::from(order.product_id.0))
        .bind(i64::from(order.quantity))
        .bind(order.total_value)
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await?;

        let order = Self::decode(&row)?;
        debug!(order_id = %order.id, "Inserted");
        Ok(order)
    }

    async fn list_recent(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, customer_id, product_id, quantity, total_value::FLOAT8 AS total_value, created_at
             FROM orders
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::decode).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
