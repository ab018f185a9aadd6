//! # HTTP Surface
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/health` | 200 `{status, service, database, cache}` |
//! | GET | `/orders` | 200 `{data: [EnrichedOrder], source: "cache" \| "store"}` |
//! | POST | `/orders` | 201 `{data: EnrichedOrder}` |
//!
//! Failures use the body `{"error": <message>, "code": <CODE>}`; see [`ApiError`].

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::orders::OrderService;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the service router.
pub fn router(service: OrderService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
