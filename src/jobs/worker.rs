//! Worker pool draining the job queue.

use super::{JobProcessor, JobQueueError, JobReceiver};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A fixed set of workers sharing one [`JobReceiver`].
///
/// Workers run until [`shutdown`](Self::shutdown) is called or every
/// [`JobSender`](super::JobSender) has been dropped. On shutdown a worker
/// finishes the job in hand, drains whatever is still queued, and exits.
pub struct WorkerPool {
    shutdown: watch::Sender<bool>,
    workers: Vec<(String, JoinHandle<()>)>,
}

impl WorkerPool {
    /// Starts `size` workers named `worker-1` .. `worker-N`.
    pub fn spawn(size: usize, receiver: JobReceiver, processor: JobProcessor) -> Self {
        let (shutdown, _) = watch::channel(false);

        let workers = (1..=size)
            .map(|n| {
                let name = format!("worker-{n}");
                let handle = tokio::spawn(run_worker(
                    name.clone(),
                    receiver.clone(),
                    processor.clone(),
                    shutdown.subscribe(),
                ));
                (name, handle)
            })
            .collect();

        info!(size, "Worker pool started");
        Self { shutdown, workers }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Signals every worker to stop and waits up to `timeout` for them.
    ///
    /// Workers still running at the deadline are aborted and counted in
    /// [`JobQueueError::ShutdownTimedOut`].
    pub async fn shutdown(self, timeout: Duration) -> Result<(), JobQueueError> {
        info!(workers = self.workers.len(), "Stopping worker pool");
        // No receivers left means every worker has already exited.
        let _ = self.shutdown.send(true);

        let deadline = tokio::time::Instant::now() + timeout;
        let mut unfinished = 0;
        let mut failure = None;

        for (name, mut handle) in self.workers {
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(worker = %name, error = %e, "Worker task failed");
                    failure.get_or_insert(JobQueueError::WorkerFailed {
                        worker: name,
                        reason: e.to_string(),
                    });
                }
                Err(_) => {
                    warn!(worker = %name, "Worker did not stop in time, abandoning it");
                    handle.abort();
                    unfinished += 1;
                }
            }
        }

        if unfinished > 0 {
            return Err(JobQueueError::ShutdownTimedOut { unfinished });
        }
        if let Some(failure) = failure {
            return Err(failure);
        }
        info!("Worker pool stopped");
        Ok(())
    }
}

async fn run_worker(
    name: String,
    receiver: JobReceiver,
    processor: JobProcessor,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(worker = %name, "Worker started");

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            job = receiver.recv() => match job {
                Some(job) => {
                    processor.process(job).await;
                }
                None => {
                    info!(worker = %name, "Queue closed, worker exiting");
                    return;
                }
            },
        }
    }

    let mut drained = 0usize;
    while let Some(job) = receiver.try_recv().await {
        processor.process(job).await;
        drained += 1;
    }
    info!(worker = %name, drained, "Worker stopped");
}
