use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};

/// Fixed-size worker pool for independent CPU-bound tasks.
///
/// Construct one per run and pass it (usually behind an `Arc`) to whatever
/// needs parallel matrix products or batched per-sample work. Dropping the
/// executor drains in-flight tasks and joins the workers; there is no
/// cancellation of partially-executed tasks.
pub struct Executor {
    pool: ThreadPool,
    workers: usize,
}

impl Executor {
    /// Pool sized to `max(1, cores - 1)`, leaving one core for the caller.
    pub fn new() -> Result<Executor> {
        Executor::with_workers(num_cpus::get().saturating_sub(1).max(1))
    }

    pub fn with_workers(workers: usize) -> Result<Executor> {
        if workers == 0 {
            return Err(Error::Config("workers must be greater than 0".to_string()));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| Error::Executor(e.to_string()))?;
        Ok(Executor { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `op` inside the pool so that parallel iterators used within it
    /// execute on this pool's workers. Blocks until `op` returns.
    pub(crate) fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Submits one task per item and waits for all of them to finish.
    pub fn for_each<T, F>(&self, items: &[T], action: F)
    where
        T: Sync,
        F: Fn(&T) + Sync,
    {
        self.pool.scope(|scope| {
            for item in items {
                let action = &action;
                scope.spawn(move |_| action(item));
            }
        });
    }

    /// Submits items in pool-sized batches, waiting for each batch before
    /// queueing the next. Bounds the number of queued tasks at any time;
    /// the intended mode for one pass over a full training set per epoch.
    pub fn for_each_chunked<T, F>(&self, items: &[T], action: F)
    where
        T: Sync,
        F: Fn(&T) + Sync,
    {
        for chunk in items.chunks(self.workers) {
            self.pool.scope(|scope| {
                for item in chunk {
                    let action = &action;
                    scope.spawn(move |_| action(item));
                }
            });
        }
    }
}
