//! Request handlers.

use super::ApiError;
use crate::model::{CustomerId, EnrichedOrder, OrderRequest, ProductId};
use crate::orders::{ListingSource, OrderService};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub database: &'static str,
    pub cache: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<EnrichedOrder>,
    pub source: ListingSource,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub data: EnrichedOrder,
}

/// Body of `POST /orders`.
///
/// Every field is optional at the JSON level so that a missing field is
/// reported by name instead of as a generic decoding failure.
#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    pub customer_id: Option<u32>,
    pub product_id: Option<u32>,
    pub quantity: Option<i64>,
}

impl TryFrom<CreateOrderBody> for OrderRequest {
    type Error = ApiError;

    fn try_from(body: CreateOrderBody) -> Result<Self, Self::Error> {
        let customer_id = body
            .customer_id
            .ok_or_else(|| ApiError::validation("customer_id is required"))?;
        let product_id = body
            .product_id
            .ok_or_else(|| ApiError::validation("product_id is required"))?;
        let quantity = body
            .quantity
            .ok_or_else(|| ApiError::validation("quantity is required"))?;

        Ok(OrderRequest {
            customer_id: CustomerId(customer_id),
            product_id: ProductId(product_id),
            quantity,
        })
    }
}

fn connection_state(up: bool) -> &'static str {
    if up {
        "connected"
    } else {
        "disconnected"
    }
}

pub async fn health(State(service): State<OrderService>) -> Json<HealthResponse> {
    let status = service.check_dependencies().await;
    Json(HealthResponse {
        status: "ok",
        service: "orders",
        database: connection_state(status.database),
        cache: connection_state(status.cache),
    })
}

#[instrument(skip(service))]
pub async fn list_orders(
    State(service): State<OrderService>,
) -> Result<Json<ListResponse>, ApiError> {
    let listing = service.list_orders().await?;
    Ok(Json(ListResponse {
        data: listing.orders,
        source: listing.source,
    }))
}

#[instrument(skip(service, payload))]
pub async fn create_order(
    State(service): State<OrderService>,
    payload: Result<Json<CreateOrderBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(%rejection, "Rejected order body");
        ApiError::validation(rejection.body_text())
    })?;
    let request = OrderRequest::try_from(body)?;

    let order = service.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { data: order })))
}
