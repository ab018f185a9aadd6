use crate::model::{Customer, CustomerId, Product, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Store-assigned identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// A persisted sale.
///
/// `total_value` is fixed when the order is written: unit value × quantity as
/// the product stood at that moment. It is never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total_value: f64,
    pub created_at: DateTime<Utc>,
}

/// An order that has passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total_value: f64,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Prices `quantity` units of `product` for `customer_id`, stamped with `created_at`.
    pub fn priced(
        customer_id: CustomerId,
        product: &Product,
        quantity: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_id,
            product_id: product.id,
            quantity,
            total_value: product.unit_value * f64::from(quantity),
            created_at,
        }
    }

    /// Attaches the identifier the store assigned.
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            quantity: self.quantity,
            total_value: self.total_value,
            created_at: self.created_at,
        }
    }
}

/// A request to place an order, as accepted from clients.
///
/// `quantity` is kept signed so that zero and negative values reach validation
/// instead of being silently reinterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i64,
}

/// An order together with snapshots of its customer and product.
///
/// This is the shape returned to clients and the shape cached for listings.
/// `partial` is set when a snapshot could not be resolved and was left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub customer: Customer,
    pub product: Product,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
}

impl EnrichedOrder {
    pub fn new(order: Order, customer: Customer, product: Product) -> Self {
        Self {
            order,
            customer,
            product,
            partial: false,
        }
    }
}
