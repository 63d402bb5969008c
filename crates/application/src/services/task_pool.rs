use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One independent unit of work. It owns everything it touches and hands its
/// values back instead of writing to shared state.
pub type WorkItem<T> = BoxFuture<'static, Vec<T>>;

/// Counters describing what a pool did. Shared across runs when the same
/// `Arc` is handed to several pools.
#[derive(Debug, Default)]
pub struct PoolMetrics {
    workers_started: AtomicU64,
    items_completed: AtomicU64,
    items_timed_out: AtomicU64,
    items_cancelled: AtomicU64,
    items_panicked: AtomicU64,
}

impl PoolMetrics {
    pub fn workers_started(&self) -> u64 {
        self.workers_started.load(Ordering::Relaxed)
    }

    pub fn items_completed(&self) -> u64 {
        self.items_completed.load(Ordering::Relaxed)
    }

    pub fn items_timed_out(&self) -> u64 {
        self.items_timed_out.load(Ordering::Relaxed)
    }

    pub fn items_cancelled(&self) -> u64 {
        self.items_cancelled.load(Ordering::Relaxed)
    }

    pub fn items_panicked(&self) -> u64 {
        self.items_panicked.load(Ordering::Relaxed)
    }

    /// Items that were dropped without producing output.
    pub fn items_dropped(&self) -> u64 {
        self.items_timed_out() + self.items_cancelled() + self.items_panicked()
    }
}

enum ItemOutcome<T> {
    Done(Vec<T>),
    TimedOut,
    Cancelled,
    Panicked,
}

/// Fixed-size worker pool draining a shared queue of [`WorkItem`]s.
///
/// `run` starts `clamp(concurrency, 1, items)` workers (none for an empty
/// queue). Every worker pulls the next item as soon as its current one
/// finishes, so at most `concurrency` items are ever in flight. Items that
/// time out, panic or are cancelled are dropped; siblings are unaffected.
pub struct TaskPool {
    concurrency: isize,
    item_timeout: Option<Duration>,
    cancel: CancellationToken,
    metrics: Arc<PoolMetrics>,
}

impl TaskPool {
    pub fn new(concurrency: isize) -> Self {
        Self {
            concurrency,
            item_timeout: None,
            cancel: CancellationToken::new(),
            metrics: Arc::new(PoolMetrics::default()),
        }
    }

    pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<PoolMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> Arc<PoolMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Number of workers `run` would start for `items` queued items.
    pub fn worker_count(&self, items: usize) -> usize {
        if items == 0 {
            return 0;
        }
        let requested = usize::try_from(self.concurrency.max(1)).unwrap_or(1);
        requested.min(items)
    }

    /// Run every item and return the concatenation of their outputs, in
    /// completion order.
    pub async fn run<T>(&self, items: Vec<WorkItem<T>>) -> Vec<T>
    where
        T: Send + 'static,
    {
        let workers = self.worker_count(items.len());
        if workers == 0 {
            return Vec::new();
        }

        debug!(items = items.len(), workers, "Starting task pool");

        let queue = Arc::new(Mutex::new(VecDeque::from(items)));
        let results = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            self.metrics.workers_started.fetch_add(1, Ordering::Relaxed);

            let queue = Arc::clone(&queue);
            let results = Arc::clone(&results);
            let metrics = Arc::clone(&self.metrics);
            let cancel = self.cancel.clone();
            let item_timeout = self.item_timeout;

            handles.push(tokio::spawn(async move {
                let mut local = Vec::new();

                loop {
                    let next = queue.lock().await.pop_front();
                    let Some(item) = next else { break };

                    match run_item(item, item_timeout, &cancel).await {
                        ItemOutcome::Done(values) => {
                            metrics.items_completed.fetch_add(1, Ordering::Relaxed);
                            local.extend(values);
                        }
                        ItemOutcome::TimedOut => {
                            metrics.items_timed_out.fetch_add(1, Ordering::Relaxed);
                            warn!(worker_id, "Work item exceeded its deadline, dropped");
                        }
                        ItemOutcome::Cancelled => {
                            metrics.items_cancelled.fetch_add(1, Ordering::Relaxed);
                        }
                        ItemOutcome::Panicked => {
                            metrics.items_panicked.fetch_add(1, Ordering::Relaxed);
                            warn!(worker_id, "Work item panicked, dropped");
                        }
                    }
                }

                results.lock().await.extend(local);
            }));
        }

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                warn!(error = %e, "Task pool worker aborted");
            }
        }

        let mut results = results.lock().await;
        std::mem::take(&mut *results)
    }
}

async fn run_item<T>(
    item: WorkItem<T>,
    item_timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> ItemOutcome<T> {
    if cancel.is_cancelled() {
        return ItemOutcome::Cancelled;
    }

    let guarded = AssertUnwindSafe(item).catch_unwind();
    let bounded = async move {
        match item_timeout {
            Some(limit) => tokio::time::timeout(limit, guarded).await.ok(),
            None => Some(guarded.await),
        }
    };

    tokio::select! {
        _ = cancel.cancelled() => ItemOutcome::Cancelled,
        finished = bounded => match finished {
            Some(Ok(values)) => ItemOutcome::Done(values),
            Some(Err(_)) => ItemOutcome::Panicked,
            None => ItemOutcome::TimedOut,
        },
    }
}
