use crate::model::{CustomerId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Published once per processed background job.
///
/// ```json
/// {"type":"order_processed","customer_id":1,"product_id":1,"timestamp":"2024-03-01T12:00:00Z"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "order_processed")]
pub struct OrderProcessedEvent {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub timestamp: DateTime<Utc>,
}
