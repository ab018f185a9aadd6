//! Bounded job queue.

use super::{BackgroundJob, JobQueueError};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Factory for the bounded job queue.
pub struct JobQueue;

impl JobQueue {
    /// Creates a queue holding at most `capacity` jobs.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn bounded(capacity: usize) -> (JobSender, JobReceiver) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            JobSender { sender },
            JobReceiver {
                inner: Arc::new(Mutex::new(receiver)),
            },
        )
    }
}

/// Producer half of the queue. Cloned into every `OrderService`.
#[derive(Clone)]
pub struct JobSender {
    sender: mpsc::Sender<BackgroundJob>,
}

impl JobSender {
    /// Queues `job`, waiting for a free slot while the queue is full.
    ///
    /// Each job taken off the queue frees exactly one slot, so exactly one
    /// waiting caller is let through.
    pub async fn enqueue(&self, job: BackgroundJob) -> Result<(), JobQueueError> {
        self.sender
            .send(job)
            .await
            .map_err(|_| JobQueueError::Closed)
    }

    /// Number of jobs currently queued.
    pub fn pending(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }
}

/// Consumer half of the queue.
///
/// Clones share one underlying receiver, so each job is delivered to exactly
/// one of them.
#[derive(Clone)]
pub struct JobReceiver {
    inner: Arc<Mutex<mpsc::Receiver<BackgroundJob>>>,
}

impl JobReceiver {
    /// Waits for the next job. `None` once every sender is gone and the queue is empty.
    pub async fn recv(&self) -> Option<BackgroundJob> {
        self.inner.lock().await.recv().await
    }

    /// Takes the next job if one is queued right now.
    pub async fn try_recv(&self) -> Option<BackgroundJob> {
        self.inner.lock().await.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, OrderRequest, ProductId};
    use std::time::Duration;

    fn job(quantity: i64) -> BackgroundJob {
        BackgroundJob::new(OrderRequest {
            customer_id: CustomerId(1),
            product_id: ProductId(1),
            quantity,
        })
    }

    #[tokio::test]
    async fn test_jobs_come_out_in_order() {
        let (sender, receiver) = JobQueue::bounded(10);
        for quantity in 1..=3 {
            sender.enqueue(job(quantity)).await.unwrap();
        }
        assert_eq!(sender.pending(), 3);

        for quantity in 1..=3 {
            assert_eq!(receiver.recv().await.unwrap().request.quantity, quantity);
        }
        assert!(receiver.try_recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_queue_blocks_until_a_slot_frees() {
        let (sender, receiver) = JobQueue::bounded(1);
        sender.enqueue(job(1)).await.unwrap();

        let blocked = tokio::time::timeout(Duration::from_secs(1), sender.enqueue(job(2))).await;
        assert!(blocked.is_err(), "enqueue should wait while the queue is full");

        let waiting = {
            let sender = sender.clone();
            tokio::spawn(async move { sender.enqueue(job(3)).await })
        };
        let also_waiting = {
            let sender = sender.clone();
            tokio::spawn(async move { sender.enqueue(job(4)).await })
        };
        tokio::task::yield_now().await;

        assert_eq!(receiver.recv().await.unwrap().request.quantity, 1);
        tokio::time::sleep(Duration::from_millis(10)).await;

        // One slot freed, one waiter through.
        assert_eq!(sender.pending(), 1);
        assert_eq!(
            usize::from(waiting.is_finished()) + usize::from(also_waiting.is_finished()),
            1
        );

        assert!(receiver.recv().await.is_some());
        waiting.await.unwrap().unwrap();
        also_waiting.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_enqueue_after_receivers_dropped_fails() {
        let (sender, receiver) = JobQueue::bounded(1);
        drop(receiver);

        assert_eq!(sender.enqueue(job(1)).await, Err(JobQueueError::Closed));
    }

    #[tokio::test]
    async fn test_recv_ends_when_senders_dropped() {
        let (sender, receiver) = JobQueue::bounded(4);
        sender.enqueue(job(1)).await.unwrap();
        drop(sender);

        assert!(receiver.recv().await.is_some());
        assert!(receiver.recv().await.is_none());
    }
}
