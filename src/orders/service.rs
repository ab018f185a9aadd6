use super::{join_ordered, EnrichmentPolicy, ListingSource, OrderError, OrderListing, OrderSettings};
use crate::cache::Cache;
use crate::clients::{CustomerClient, ProductClient};
use crate::framework::ActorClient;
use crate::jobs::{BackgroundJob, JobSender};
use crate::model::{Customer, EnrichedOrder, NewOrder, Order, OrderRequest, Product};
use crate::store::OrderStore;
use chrono::Utc;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Reachability of the service's external dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyStatus {
    pub database: bool,
    pub cache: bool,
}

/// Write generation of the order table, as seen by this process.
///
/// A listing built from a store read older than the latest write must not be
/// cached. The lock keeps a cache refill and an invalidation from interleaving.
#[derive(Default)]
struct ListingGeneration {
    current: AtomicU64,
    lock: RwLock<()>,
}

/// The order read and write paths.
///
/// Every collaborator is passed in at construction, so tests can swap any of
/// them for an in-memory or failing double. Cloning is cheap and clones share
/// the same collaborators.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    cache: Arc<dyn Cache>,
    customers: CustomerClient,
    products: ProductClient,
    jobs: JobSender,
    settings: Arc<OrderSettings>,
    generation: Arc<ListingGeneration>,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        cache: Arc<dyn Cache>,
        customers: CustomerClient,
        products: ProductClient,
        jobs: JobSender,
        settings: OrderSettings,
    ) -> Self {
        Self {
            store,
            cache,
            customers,
            products,
            jobs,
            settings: Arc::new(settings),
            generation: Arc::new(ListingGeneration::default()),
        }
    }

    pub fn settings(&self) -> &OrderSettings {
        &self.settings
    }

    /// Returns every order, newest first, with its customer and product.
    ///
    /// # Errors
    ///
    /// - [`OrderError::Persistence`] if the store cannot be read.
    /// - [`OrderError::Enrichment`] under [`EnrichmentPolicy::Strict`] when an
    ///   order's customer or product cannot be resolved.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<OrderListing, OrderError> {
        if let Some(orders) = self.cached_listing().await {
            info!(count = orders.len(), source = %ListingSource::Cache, "Listing served");
            return Ok(OrderListing {
                orders,
                source: ListingSource::Cache,
            });
        }

        let generation = self.generation.current.load(Ordering::Acquire);
        let orders = self.store.list_recent().await.map_err(|e| {
            error!(error = %e, "Failed to read orders");
            OrderError::Persistence(e)
        })?;
        let orders = self.enrich_all(orders).await?;
        self.cache_listing(&orders, generation).await;

        info!(count = orders.len(), source = %ListingSource::Store, "Listing served");
        Ok(OrderListing {
            orders,
            source: ListingSource::Store,
        })
    }

    /// Places an order.
    ///
    /// Side effects, strictly after validation and lookups succeed and in this
    /// order: one store write, removal of the cached listing, one queued job.
    /// Queueing waits while the job queue is full.
    ///
    /// # Errors
    ///
    /// - [`OrderError::Validation`] if `quantity` is not a positive integer or
    ///   the total does not fit the stored precision.
    /// - [`OrderError::CustomerNotFound`] / [`OrderError::ProductNotFound`].
    /// - [`OrderError::Persistence`] if the store write fails.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id, product_id = %request.product_id))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<EnrichedOrder, OrderError> {
        debug!(?request, "create_order called");
        let quantity = validate_quantity(request.quantity)?;

        let customer = self
            .within_deadline("customer", self.customers.get(request.customer_id))
            .await?
            .ok_or(OrderError::CustomerNotFound(request.customer_id))?;
        let product = self
            .within_deadline("product", self.products.get(request.product_id))
            .await?
            .ok_or(OrderError::ProductNotFound(request.product_id))?;

        let new_order = NewOrder::priced(customer.id, &product, quantity, Utc::now());
        validate_total(new_order.total_value)?;
        let order = self.store.insert(new_order).await.map_err(|e| {
            error!(error = %e, "Failed to persist order");
            OrderError::Persistence(e)
        })?;
        info!(order_id = %order.id, total_value = order.total_value, "Order created");

        self.invalidate_listing().await;

        if let Err(e) = self.jobs.enqueue(BackgroundJob::new(request)).await {
            // Only happens while the worker pool is shutting down.
            error!(order_id = %order.id, error = %e, "Background job not queued");
        }

        Ok(EnrichedOrder::new(order, customer, product))
    }

    /// Pings the store and the cache concurrently.
    pub async fn check_dependencies(&self) -> DependencyStatus {
        let (database, cache) = tokio::join!(self.store.ping(), self.cache.ping());
        if let Err(e) = &database {
            warn!(error = %e, "Store ping failed");
        }
        if let Err(e) = &cache {
            warn!(error = %e, "Cache ping failed");
        }
        DependencyStatus {
            database: database.is_ok(),
            cache: cache.is_ok(),
        }
    }

    async fn cached_listing(&self) -> Option<Vec<EnrichedOrder>> {
        match self.cache.get(&self.settings.cache_key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(orders) => Some(orders),
                Err(e) => {
                    warn!(error = %e, "Discarding undecodable cached listing");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn cache_listing(&self, orders: &[EnrichedOrder], generation: u64) {
        let payload = match serde_json::to_string(orders) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Listing not cached");
                return;
            }
        };
        let _guard = self.generation.lock.read().await;
        if self.generation.current.load(Ordering::Acquire) != generation {
            debug!("Orders written while listing, not caching a stale listing");
            return;
        }
        if let Err(e) = self
            .cache
            .set(&self.settings.cache_key, &payload, self.settings.cache_ttl)
            .await
        {
            warn!(error = %e, "Cache write failed");
        }
    }

    async fn invalidate_listing(&self) {
        let _guard = self.generation.lock.write().await;
        self.generation.current.fetch_add(1, Ordering::AcqRel);
        if let Err(e) = self.cache.delete(&self.settings.cache_key).await {
            warn!(error = %e, "Cache invalidation failed");
        }
    }

    async fn enrich_all(&self, orders: Vec<Order>) -> Result<Vec<EnrichedOrder>, OrderError> {
        let tasks = orders.into_iter().map(|order| {
            let service = self.clone();
            async move { service.enrich(order).await }
        });

        let results = join_ordered(tasks).await.map_err(|e| {
            error!(error = %e, "Enrichment task failed");
            OrderError::ActorCommunicationError(e.to_string())
        })?;
        results.into_iter().collect()
    }

    async fn enrich(&self, order: Order) -> Result<EnrichedOrder, OrderError> {
        let (customer, product) = tokio::join!(
            self.within_deadline("customer", self.customers.get(order.customer_id)),
            self.within_deadline("product", self.products.get(order.product_id)),
        );

        let customer = resolved(customer, || format!("{} not found", order.customer_id));
        let product = resolved(product, || format!("{} not found", order.product_id));

        match (customer, product) {
            (Ok(customer), Ok(product)) => Ok(EnrichedOrder::new(order, customer, product)),
            (customer, product) => {
                let reason = [customer.as_ref().err(), product.as_ref().err()]
                    .into_iter()
                    .flatten()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("; ");

                match self.settings.enrichment_policy {
                    EnrichmentPolicy::Strict => Err(OrderError::Enrichment {
                        order_id: order.id,
                        reason,
                    }),
                    EnrichmentPolicy::Lenient => {
                        warn!(order_id = %order.id, %reason, "Order listed without full details");
                        Ok(EnrichedOrder {
                            order,
                            customer: customer.unwrap_or_else(|_| Customer::default()),
                            product: product.unwrap_or_else(|_| Product::default()),
                            partial: true,
                        })
                    }
                }
            }
        }
    }

    async fn within_deadline<T, E>(
        &self,
        what: &'static str,
        lookup: impl Future<Output = Result<Option<T>, E>>,
    ) -> Result<Option<T>, OrderError>
    where
        OrderError: From<E>,
    {
        let result = match self.settings.lookup_timeout {
            Some(after) => tokio::time::timeout(after, lookup)
                .await
                .map_err(|_| OrderError::LookupTimeout { what, after })?,
            None => lookup.await,
        };
        Ok(result?)
    }
}

fn validate_quantity(quantity: i64) -> Result<u32, OrderError> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            OrderError::Validation(format!("quantity must be a positive integer, got {quantity}"))
        })
}

/// Largest total a `NUMERIC(10, 2)` column holds, in cents.
const MAX_TOTAL_CENTS: f64 = 9_999_999_999.0;

fn validate_total(total_value: f64) -> Result<(), OrderError> {
    let cents = (total_value * 100.0).round();
    if cents.is_finite() && cents <= MAX_TOTAL_CENTS {
        Ok(())
    } else {
        Err(OrderError::Validation(format!(
            "order total {total_value:.2} exceeds the maximum of 99999999.99"
        )))
    }
}

fn resolved<T>(
    lookup: Result<Option<T>, OrderError>,
    missing: impl FnOnce() -> String,
) -> Result<T, String> {
    match lookup {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(missing()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_must_be_positive() {
        assert_eq!(validate_quantity(3).unwrap(), 3);
        for bad in [0, -1, i64::from(u32::MAX) + 1] {
            assert!(matches!(
                validate_quantity(bad),
                Err(OrderError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_total_must_fit_stored_precision() {
        assert!(validate_total(99_999_999.99).is_ok());
        assert!(validate_total(0.0).is_ok());
        for bad in [100_000_000.0, 99_999_999.995, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                validate_total(bad),
                Err(OrderError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_resolved_describes_the_failure() {
        assert_eq!(resolved(Ok(Some(1)), || "missing".into()), Ok(1));
        assert_eq!(
            resolved::<u8>(Ok(None), || "customer_9 not found".into()),
            Err("customer_9 not found".to_string())
        );
        let timed_out = OrderError::LookupTimeout {
            what: "product",
            after: std::time::Duration::from_millis(50),
        };
        assert_eq!(
            resolved::<u8>(Err(timed_out), || unreachable!()),
            Err("Lookup of product timed out after 50ms".to_string())
        );
    }
}
