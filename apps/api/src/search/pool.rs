//! Bounded worker pool for CPU-bound batch jobs.
//!
//! Jobs run on tokio's blocking threads, but at most `size` of them at once. Inputs are
//! moved into each job and results moved out, so workers share no mutable state.
//! Dropping the pool closes it: jobs still waiting for a slot are abandoned.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::search::processor::panic_message;
use crate::search::SearchError;

#[derive(Debug)]
pub struct WorkerPool {
    slots: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// Pool sized `min(cap, available cores)`.
    pub fn new(cap: usize) -> Result<Self, SearchError> {
        Self::with_cpus(cap, num_cpus::get())
    }

    pub fn with_cpus(cap: usize, cpus: usize) -> Result<Self, SearchError> {
        let size = effective_pool_size(cap, cpus)?;
        Ok(Self {
            slots: Arc::new(Semaphore::new(size)),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs all `jobs` concurrently (bounded by the pool size) and waits for every one.
    ///
    /// Outcomes come back in submission order. A job that panics or is aborted yields
    /// `Err(message)` without affecting the others; only a closed pool fails the call.
    pub async fn run_all<T, F>(&self, jobs: Vec<F>) -> Result<Vec<Result<T, String>>, SearchError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let count = jobs.len();
        let mut set = JoinSet::new();

        for (idx, job) in jobs.into_iter().enumerate() {
            let slots = self.slots.clone();
            set.spawn(async move {
                let permit = match slots.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (idx, Err(SearchError::PoolClosed)),
                };
                let outcome = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    job()
                })
                .await
                .map_err(|e| {
                    if e.is_panic() {
                        panic_message(e.into_panic().as_ref())
                    } else {
                        "worker cancelled".to_string()
                    }
                });
                (idx, Ok(outcome))
            });
        }

        let mut outcomes: Vec<Option<Result<T, String>>> = (0..count).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, Ok(outcome))) => outcomes[idx] = Some(outcome),
                Ok((_, Err(e))) => return Err(e),
                // The slot stays empty and is reported as aborted below.
                Err(e) => tracing::warn!(error = %e, "worker task did not complete"),
            }
        }

        Ok(outcomes
            .into_iter()
            .map(|o| o.unwrap_or_else(|| Err("worker task aborted".to_string())))
            .collect())
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.slots.close();
    }
}

/// `min(cap, cpus)`, never zero. A zero cap is a configuration error.
pub fn effective_pool_size(cap: usize, cpus: usize) -> Result<usize, SearchError> {
    if cap == 0 {
        return Err(SearchError::InvalidSettings(
            "worker cap must be at least 1".to_string(),
        ));
    }
    Ok(cap.min(cpus.max(1)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_pool_size_single_core() {
        assert_eq!(effective_pool_size(4, 1).unwrap(), 1);
    }

    #[test]
    fn test_pool_size_many_cores() {
        assert_eq!(effective_pool_size(4, 16).unwrap(), 4);
    }

    #[test]
    fn test_pool_size_never_zero() {
        assert_eq!(effective_pool_size(4, 0).unwrap(), 1);
        assert!(matches!(
            effective_pool_size(0, 8),
            Err(SearchError::InvalidSettings(_))
        ));
    }

    #[tokio::test]
    async fn test_results_in_submission_order() {
        let pool = WorkerPool::with_cpus(3, 3).unwrap();
        let jobs: Vec<_> = (0..6u64)
            .map(|i| {
                move || {
                    std::thread::sleep(Duration::from_millis(30 - i * 5));
                    i
                }
            })
            .collect();

        let out = pool.run_all(jobs).await.unwrap();
        let values: Vec<u64> = out.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_concurrency_bounded_by_pool_size() {
        let pool = WorkerPool::with_cpus(2, 8).unwrap();
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let jobs: Vec<_> = (0..8)
            .map(|_| {
                let running = running.clone();
                let peak = peak.clone();
                move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    running.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .collect();

        pool.run_all(jobs).await.unwrap();
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_panicking_job_does_not_sink_others() {
        let pool = WorkerPool::with_cpus(2, 2).unwrap();
        let jobs: Vec<Box<dyn FnOnce() -> i32 + Send>> = vec![
            Box::new(|| 1),
            Box::new(|| panic!("batch crashed")),
            Box::new(|| 3),
        ];

        let out = pool.run_all(jobs).await.unwrap();
        assert_eq!(out[0], Ok(1));
        assert!(out[1].as_ref().unwrap_err().contains("batch crashed"));
        assert_eq!(out[2], Ok(3));
    }

    #[tokio::test]
    async fn test_closed_pool_is_fatal() {
        let pool = WorkerPool::with_cpus(1, 1).unwrap();
        pool.slots.close();

        let result = pool.run_all(vec![|| 1]).await;
        assert!(matches!(result, Err(SearchError::PoolClosed)));
    }
}
