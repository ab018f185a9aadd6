//! Processing of a single background job.

use super::{BackgroundJob, OrderProcessedEvent};
use crate::cache::Cache;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Turns a [`BackgroundJob`] into a published [`OrderProcessedEvent`].
///
/// Processing never fails from the worker's point of view: a publication
/// error is logged and the event is dropped.
#[derive(Clone)]
pub struct JobProcessor {
    cache: Arc<dyn Cache>,
    channel: String,
    delay: Duration,
}

impl JobProcessor {
    pub fn new(cache: Arc<dyn Cache>, channel: impl Into<String>, delay: Duration) -> Self {
        Self {
            cache,
            channel: channel.into(),
            delay,
        }
    }

    #[instrument(skip(self, job), fields(customer_id = %job.request.customer_id, product_id = %job.request.product_id))]
    pub async fn process(&self, job: BackgroundJob) -> OrderProcessedEvent {
        tokio::time::sleep(self.delay).await;

        let event = OrderProcessedEvent {
            customer_id: job.request.customer_id,
            product_id: job.request.product_id,
            timestamp: Utc::now(),
        };

        match serde_json::to_string(&event) {
            Ok(payload) => match self.cache.publish(&self.channel, &payload).await {
                Ok(()) => info!(channel = %self.channel, "Order processed"),
                Err(e) => warn!(channel = %self.channel, error = %e, "Event publication failed"),
            },
            Err(e) => warn!(error = %e, "Event serialization failed"),
        }

        event
    }
}
