//! # Orders
//!
//! The order read and write paths.
//!
//! ## Write path
//!
//! [`OrderService::create_order`] validates the request, resolves the customer
//! and product, prices the order and persists it. Only after the write succeeds
//! does it drop the cached listing and hand a [`BackgroundJob`](crate::jobs::BackgroundJob)
//! to the worker pool, in that order. A failed validation, lookup or write leaves
//! the store, the cache and the queue untouched.
//!
//! ## Read path
//!
//! [`OrderService::list_orders`] is cache-aside. A hit is returned as is. On a
//! miss the store is queried, every order is enriched in its own task, the
//! results are joined back in store order and the assembled listing is cached.
//!
//! What happens when one order cannot be enriched is set by [`EnrichmentPolicy`].

pub mod error;
pub mod fanout;
pub mod service;

pub use error::OrderError;
pub use fanout::join_ordered;
pub use service::{DependencyStatus, OrderService};

use crate::model::EnrichedOrder;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// What to do with an order whose customer or product cannot be resolved
/// while building a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnrichmentPolicy {
    /// Keep the order, leave the missing snapshot empty and flag it `partial`.
    #[default]
    Lenient,
    /// Fail the whole listing.
    Strict,
}

/// Unrecognised [`EnrichmentPolicy`] name.
#[derive(Debug, thiserror::Error)]
#[error("unknown enrichment policy: {0}")]
pub struct UnknownPolicy(String);

impl FromStr for EnrichmentPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Tunables for [`OrderService`].
#[derive(Debug, Clone)]
pub struct OrderSettings {
    /// Key the full listing is cached under.
    pub cache_key: String,
    pub cache_ttl: Duration,
    /// Deadline for each customer or product lookup. `None` waits indefinitely.
    pub lookup_timeout: Option<Duration>,
    pub enrichment_policy: EnrichmentPolicy,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            cache_key: "orders:all".to_string(),
            cache_ttl: Duration::from_secs(300),
            lookup_timeout: None,
            enrichment_policy: EnrichmentPolicy::Lenient,
        }
    }
}

/// Where a listing was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingSource {
    Cache,
    Store,
}

impl Display for ListingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => f.write_str("cache"),
            Self::Store => f.write_str("store"),
        }
    }
}

/// Result of [`OrderService::list_orders`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderListing {
    /// Newest first.
    pub orders: Vec<EnrichedOrder>,
    pub source: ListingSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names() {
        assert_eq!("lenient".parse::<EnrichmentPolicy>().unwrap(), EnrichmentPolicy::Lenient);
        assert_eq!("STRICT".parse::<EnrichmentPolicy>().unwrap(), EnrichmentPolicy::Strict);
        assert!("partial".parse::<EnrichmentPolicy>().is_err());
    }

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ListingSource::Cache).unwrap(), "cache");
        assert_eq!(ListingSource::Store.to_string(), "store");
    }
}
