//! # Sales Service
//!
//! > **Orders in, enriched listings out, events on the side.**
//!
//! This crate records sales. It accepts orders over HTTP, prices them against
//! reference data, persists them in Postgres, serves enriched listings through
//! a Redis cache and hands every new order to a pool of background workers that
//! announce it on a pub/sub channel.
//!
//! ## 🏗️ Design
//!
//! ### Reference data lives in actors
//! Customers and products are owned by a generic `ResourceActor<T>`, one Tokio task
//! per type. The message loop is written **once** in [`framework`] and reused for
//! both. Lookups are plain async calls on a cloneable client, so the read path can
//! fire one per order at once.
//!
//! ### Collaborators are injected
//! [`OrderService`](orders::OrderService) receives its store, cache, clients and job
//! queue at construction. Nothing is global, and every one of them has an
//! in-memory or mock double for tests.
//!
//! ### Write path ordering
//! Validate, look up, price, persist. Only then: drop the cached listing, then queue
//! the background job. A request that fails before the write leaves no trace.
//!
//! ### Back-pressure
//! The job queue is bounded. When it is full, order creation waits for a worker to
//! free a slot; jobs are never dropped.
//!
//! ### Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic actor plumbing: [`ActorEntity`](framework::ActorEntity),
//! [`ResourceActor`](framework::ResourceActor), [`ResourceClient`](framework::ResourceClient),
//! and the [`mock`](framework::mock) test doubles.
//!
//! ### 2. Reference Data ([`customer_actor`], [`product_actor`], [`clients`])
//! The two concrete actors and their typed clients.
//!
//! ### 3. Infrastructure ([`store`], [`cache`], [`jobs`])
//! Order persistence, the listing cache and pub/sub, the job queue and worker pool.
//!
//! ### 4. The Core ([`orders`])
//! The cache-aside read path and the write path.
//!
//! ### 5. The Edge ([`api`], [`config`], [`lifecycle`])
//! HTTP routes, environment configuration, and [`SalesSystem`](lifecycle::SalesSystem),
//! which wires everything together and shuts it down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Needs Postgres and Redis; see config for the variables
//! RUST_LOG=info cargo run
//!
//! curl -X POST localhost:8080/orders \
//!   -H 'content-type: application/json' \
//!   -d '{"customer_id": 1, "product_id": 1, "quantity": 3}'
//! ```

pub mod api;
pub mod cache;
pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod framework;
pub mod jobs;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod product_actor;
pub mod store;
