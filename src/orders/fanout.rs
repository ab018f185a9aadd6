//! Ordered fan-out/join.

use std::future::Future;
use tokio::task::{JoinError, JoinHandle};

/// Runs every future in its own task and returns their outputs in input order.
///
/// All tasks are started before any is awaited, so they make progress
/// concurrently; the result for position `i` is always the output of the
/// `i`-th future, whichever finished first. There is no deadline here: put
/// one inside the futures if it is needed.
///
/// # Errors
///
/// Returns the [`JoinError`] of the first task, in input order, that panicked
/// or was cancelled.
pub async fn join_ordered<I, F, T>(futures: I) -> Result<Vec<T>, JoinError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<JoinHandle<T>> = futures.into_iter().map(tokio::spawn).collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_input_order() {
        // Later inputs finish first.
        let futures = (0..5u64).map(|i| async move {
            tokio::time::sleep(Duration::from_millis(100 * (5 - i))).await;
            i
        });

        let started = tokio::time::Instant::now();
        let results = join_ordered(futures).await.unwrap();

        assert_eq!(results, vec![0, 1, 2, 3, 4]);
        // Concurrent: total time is the slowest task, not the sum.
        assert!(started.elapsed() < Duration::from_millis(600));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results: Vec<u8> = join_ordered(Vec::<std::future::Ready<u8>>::new())
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported() {
        let futures = (0..3).map(|i| async move {
            if i == 1 {
                panic!("lookup exploded");
            }
            i
        });

        let error = join_ordered(futures).await.unwrap_err();
        assert!(error.is_panic());
    }
}
