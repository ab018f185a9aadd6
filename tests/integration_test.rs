mod common;

use sales_service::cache::{Cache, InMemoryCache};
use sales_service::config::Config;
use sales_service::framework::ActorClient;
use sales_service::jobs::OrderProcessedEvent;
use sales_service::lifecycle::SalesSystem;
use sales_service::model::{CustomerId, OrderRequest, ProductId};
use sales_service::orders::{ListingSource, OrderError};
use sales_service::store::InMemoryOrderStore;
use std::sync::Arc;
use std::time::Duration;

fn test_config() -> Config {
    let mut config = Config::default();
    config.jobs.processing_delay_ms = 0;
    config.server.shutdown_timeout_secs = 5;
    config
}

fn request(customer: u32, product: u32, quantity: i64) -> OrderRequest {
    OrderRequest {
        customer_id: CustomerId(customer),
        product_id: ProductId(product),
        quantity,
    }
}

/// Full end-to-end test with real actors, workers and in-memory infrastructure.
#[tokio::test]
async fn test_full_order_flow() {
    let store = Arc::new(InMemoryOrderStore::new());
    let cache = Arc::new(InMemoryCache::new());
    let mut events = cache.subscribe();
    let system = SalesSystem::start(&test_config(), store.clone(), cache.clone())
        .await
        .expect("Failed to start system");
    let service = system.service();

    // Seed data is in place
    let joao = system
        .customer_client()
        .get(CustomerId(1))
        .await
        .unwrap()
        .expect("Seed customer missing");
    assert_eq!(joao.name, "João");

    // Write path
    let created = service.create_order(request(1, 1, 3)).await.unwrap();
    assert_eq!(created.order.total_value, 30.0);
    assert_eq!(created.order.quantity, 3);
    assert_eq!(created.customer.phone, "99999-0001");
    assert_eq!(created.product.name, "Product A");
    assert_eq!(store.len(), 1);

    // A background job announces the order
    let published = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("No event published")
        .unwrap();
    assert_eq!(published.channel, "orders:processed");
    let event: OrderProcessedEvent = serde_json::from_str(&published.message).unwrap();
    assert_eq!(event.customer_id, CustomerId(1));
    assert_eq!(event.product_id, ProductId(1));

    // Read path: store first, cache second
    let first = service.list_orders().await.unwrap();
    assert_eq!(first.source, ListingSource::Store);
    assert_eq!(first.orders.len(), 1);
    assert_eq!(first.orders[0], created);

    let second = service.list_orders().await.unwrap();
    assert_eq!(second.source, ListingSource::Cache);
    assert_eq!(second.orders, first.orders);

    // A new order drops the cached listing
    let newer = service.create_order(request(2, 2, 2)).await.unwrap();
    assert_eq!(newer.order.total_value, 40.0);
    assert!(!cache.contains("orders:all"));

    let third = service.list_orders().await.unwrap();
    assert_eq!(third.source, ListingSource::Store);
    let ids: Vec<_> = third.orders.iter().map(|o| o.order.id).collect();
    assert_eq!(ids, vec![newer.order.id, created.order.id]);

    drop(service);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_unknown_customer_leaves_no_trace() {
    let store = Arc::new(InMemoryOrderStore::new());
    let cache = Arc::new(InMemoryCache::new());
    let mut events = cache.subscribe();
    let system = SalesSystem::start(&test_config(), store.clone(), cache.clone())
        .await
        .unwrap();
    let service = system.service();

    // Cache a listing so an invalidation would be visible
    service.list_orders().await.unwrap();
    assert!(cache.contains("orders:all"));

    let result = service.create_order(request(999, 1, 1)).await;
    assert!(matches!(
        result,
        Err(OrderError::CustomerNotFound(CustomerId(999)))
    ));

    let result = service.create_order(request(1, 999, 1)).await;
    assert!(matches!(
        result,
        Err(OrderError::ProductNotFound(ProductId(999)))
    ));

    // No write, no invalidation, no job
    assert!(store.is_empty());
    assert!(cache.contains("orders:all"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(events.try_recv().is_err());

    drop(service);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_drains_queued_jobs() {
    let mut config = test_config();
    config.jobs.workers = 1;
    config.jobs.processing_delay_ms = 20;

    let cache = Arc::new(InMemoryCache::new());
    let mut events = cache.subscribe();
    let system = SalesSystem::start(&config, Arc::new(InMemoryOrderStore::new()), cache.clone())
        .await
        .unwrap();
    let service = system.service();

    for quantity in 1..=5 {
        service.create_order(request(1, 2, quantity)).await.unwrap();
    }
    drop(service);
    system.shutdown().await.unwrap();

    for _ in 0..5 {
        events.try_recv().expect("Queued job was not processed");
    }
    // Nothing is published after shutdown
    cache.publish("probe", "x").await.unwrap();
    assert_eq!(events.try_recv().unwrap().channel, "probe");
}
