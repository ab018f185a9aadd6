use crate::cache::Cache;
use crate::clients::{CustomerClient, ProductClient};
use crate::config::Config;
use crate::customer_actor::{self, CustomerError};
use crate::jobs::{JobProcessor, JobQueue, JobQueueError, WorkerPool};
use crate::model::{CustomerCreate, ProductCreate};
use crate::orders::OrderService;
use crate::product_actor::{self, ProductError};
use crate::store::OrderStore;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors raised while starting or stopping the [`SalesSystem`].
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to seed customers: {0}")]
    SeedCustomers(#[from] CustomerError),

    #[error("Failed to seed products: {0}")]
    SeedProducts(#[from] ProductError),

    #[error("Worker pool shutdown failed: {0}")]
    Workers(#[from] JobQueueError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// The running service: reference actors, the worker pool and the order service.
///
/// `SalesSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the actors and workers
/// - **Dependency Wiring**: handing the store, cache, clients and job queue to [`OrderService`]
/// - **Seeding**: registering the reference customers and products
///
/// # Example
///
/// ```ignore
/// let system = SalesSystem::start(&config, store, cache).await?;
/// let app = api::router(system.service());
/// // ... serve ...
/// system.shutdown().await?;
/// ```
pub struct SalesSystem {
    service: OrderService,
    customer_client: CustomerClient,
    product_client: ProductClient,
    workers: WorkerPool,
    shutdown_timeout: Duration,
    /// Task handles for the reference actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl SalesSystem {
    /// Spawns the actors, seeds reference data and starts the worker pool.
    ///
    /// # Errors
    ///
    /// Returns error if the seed data is rejected.
    pub async fn start(
        config: &Config,
        store: Arc<dyn OrderStore>,
        cache: Arc<dyn Cache>,
    ) -> Result<Self, SystemError> {
        // 1. Reference actors
        let (customer_actor, customer_client) = customer_actor::new();
        let (product_actor, product_client) = product_actor::new();
        let handles = vec![
            tokio::spawn(customer_actor.run()),
            tokio::spawn(product_actor.run()),
        ];

        // 2. Reference data
        seed(&customer_client, &product_client).await?;

        // 3. Job queue and workers
        let (jobs, receiver) = JobQueue::bounded(config.jobs.queue_capacity);
        let processor = JobProcessor::new(
            cache.clone(),
            config.jobs.event_channel.clone(),
            Duration::from_millis(config.jobs.processing_delay_ms),
        );
        let workers = WorkerPool::spawn(config.jobs.workers, receiver, processor);

        // 4. Order service
        let service = OrderService::new(
            store,
            cache,
            customer_client.clone(),
            product_client.clone(),
            jobs,
            config.order_settings(),
        );

        info!(
            workers = config.jobs.workers,
            queue_capacity = config.jobs.queue_capacity,
            "Sales system started"
        );
        Ok(Self {
            service,
            customer_client,
            product_client,
            workers,
            shutdown_timeout: config.shutdown_timeout(),
            handles,
        })
    }

    /// A handle to the order service. Clones share the running system.
    pub fn service(&self) -> OrderService {
        self.service.clone()
    }

    pub fn customer_client(&self) -> &CustomerClient {
        &self.customer_client
    }

    pub fn product_client(&self) -> &ProductClient {
        &self.product_client
    }

    /// Stops the worker pool, then the reference actors.
    ///
    /// Queued jobs are drained first, bounded by the configured shutdown
    /// timeout. Actors stop once every client clone is dropped, so any
    /// [`OrderService`] handed out by [`service`](Self::service) must be
    /// dropped before calling this.
    ///
    /// # Errors
    ///
    /// Returns the first failure; later steps still run.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down sales system...");
        let mut first_error = None;

        drop(self.service);
        if let Err(e) = self.workers.shutdown(self.shutdown_timeout).await {
            error!(error = %e, "Worker pool did not stop cleanly");
            first_error.get_or_insert(SystemError::from(e));
        }

        drop(self.customer_client);
        drop(self.product_client);
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                first_error.get_or_insert(SystemError::ActorTask(e.to_string()));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("Sales system shutdown complete.");
                Ok(())
            }
        }
    }
}

async fn seed(customers: &CustomerClient, products: &ProductClient) -> Result<(), SystemError> {
    for (name, phone) in [("João", "99999-0001"), ("Maria", "99999-0002")] {
        customers
            .register(CustomerCreate {
                name: name.to_string(),
                phone: phone.to_string(),
            })
            .await?;
    }

    for (name, description, unit_value) in [
        ("Product A", "Description A", 10.0),
        ("Product B", "Description B", 20.0),
    ] {
        products
            .register(ProductCreate {
                name: name.to_string(),
                description: description.to_string(),
                unit_value,
            })
            .await?;
    }

    info!(customers = 2, products = 2, "Reference data seeded");
    Ok(())
}
