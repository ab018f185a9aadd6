//! # Background Jobs
//!
//! Every order written by the service is handed to a bounded in-memory queue.
//! A fixed pool of workers drains it: each job is delayed, then announced as an
//! [`OrderProcessedEvent`] on a pub/sub channel.
//!
//! - [`JobQueue`] - bounded FIFO split into [`JobSender`] and [`JobReceiver`].
//!   A full queue makes [`JobSender::enqueue`] wait, which is the service's only
//!   back-pressure.
//! - [`JobProcessor`] - what a worker does with one job.
//! - [`WorkerPool`] - the long-running workers and their shutdown signal.
//!
//! Jobs live only in memory. Anything still queued when the process dies is lost.

pub mod event;
pub mod processor;
pub mod queue;
pub mod worker;

pub use event::OrderProcessedEvent;
pub use processor::JobProcessor;
pub use queue::{JobQueue, JobReceiver, JobSender};
pub use worker::WorkerPool;

use crate::model::OrderRequest;
use thiserror::Error;

/// A queued order awaiting background processing.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundJob {
    pub request: OrderRequest,
}

impl BackgroundJob {
    pub fn new(request: OrderRequest) -> Self {
        Self { request }
    }
}

/// Errors raised by the job queue and the worker pool.
#[derive(Debug, Error, PartialEq)]
pub enum JobQueueError {
    /// Every receiver is gone; the job was not queued.
    #[error("Job queue closed")]
    Closed,

    /// Some workers were still busy when the shutdown timeout expired.
    #[error("{unfinished} worker(s) did not stop in time")]
    ShutdownTimedOut { unfinished: usize },

    /// A worker task panicked.
    #[error("Worker {worker} failed: {reason}")]
    WorkerFailed { worker: String, reason: String },
}
