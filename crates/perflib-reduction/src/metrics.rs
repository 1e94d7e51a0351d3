//! Instrumentation hooks for guarded queries
//!
//! Guarded queries report every invocation to a [`ReductionRecorder`].
//! [`ReductionMetrics`] keeps in-process atomic counters; other backends
//! (e.g. Prometheus) implement the trait themselves.
//!
//! ## Usage
//!
//! ```ignore
//! use perflib_reduction::{GuardedQuery, ReductionMetrics, ReductionPolicy};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(ReductionMetrics::new());
//! let guarded = GuardedQuery::new(raw_query, ReductionPolicy::default())
//!     .with_recorder(metrics.clone());
//!
//! guarded.query()?;
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Trait for recording guarded query activity
pub trait ReductionRecorder: Send + Sync {
    /// The raw query failed; its error was propagated unchanged.
    fn record_query_failure(&self);

    /// The raw query succeeded and was reduced.
    ///
    /// # Arguments
    /// * `kept` - Objects returned to the caller
    /// * `removed` - Objects dropped as disallowed
    /// * `duration` - Time spent reducing
    fn record_reduction(&self, kept: usize, removed: usize, duration: Duration);
}

/// Atomic counters for guarded query activity
#[derive(Default, Debug)]
pub struct ReductionMetrics {
    /// Total guarded query invocations
    pub queries_total: AtomicU64,
    /// Invocations whose raw query failed
    pub query_failures: AtomicU64,
    /// Objects returned to callers
    pub objects_kept: AtomicU64,
    /// Objects removed as disallowed
    pub objects_removed: AtomicU64,
    /// Cumulative reduction time in nanoseconds
    pub reduction_time_ns: AtomicU64,
}

impl ReductionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> ReductionSnapshot {
        ReductionSnapshot {
            queries_total: self.queries_total.load(Ordering::Relaxed),
            query_failures: self.query_failures.load(Ordering::Relaxed),
            objects_kept: self.objects_kept.load(Ordering::Relaxed),
            objects_removed: self.objects_removed.load(Ordering::Relaxed),
            avg_reduction_ns: self.avg_reduction_time_ns(),
        }
    }

    /// Average reduction time over successful queries
    pub fn avg_reduction_time_ns(&self) -> u64 {
        let total = self.reduction_time_ns.load(Ordering::Relaxed);
        let succeeded = self
            .queries_total
            .load(Ordering::Relaxed)
            .saturating_sub(self.query_failures.load(Ordering::Relaxed));
        if succeeded > 0 {
            total / succeeded
        } else {
            0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.queries_total.store(0, Ordering::Relaxed);
        self.query_failures.store(0, Ordering::Relaxed);
        self.objects_kept.store(0, Ordering::Relaxed);
        self.objects_removed.store(0, Ordering::Relaxed);
        self.reduction_time_ns.store(0, Ordering::Relaxed);
    }
}

impl ReductionRecorder for ReductionMetrics {
    fn record_query_failure(&self) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
        self.query_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn record_reduction(&self, kept: usize, removed: usize, duration: Duration) {
        self.queries_total.fetch_add(1, Ordering::Relaxed);
        self.objects_kept.fetch_add(kept as u64, Ordering::Relaxed);
        self.objects_removed.fetch_add(removed as u64, Ordering::Relaxed);
        self.reduction_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReductionSnapshot {
    pub queries_total: u64,
    pub query_failures: u64,
    pub objects_kept: u64,
    pub objects_removed: u64,
    pub avg_reduction_ns: u64,
}

/// No-op recorder for when metrics are disabled
#[derive(Default, Debug, Clone, Copy)]
pub struct NoOpRecorder;

impl ReductionRecorder for NoOpRecorder {
    fn record_query_failure(&self) {}
    fn record_reduction(&self, _: usize, _: usize, _: Duration) {}
}
