//! Prometheus metrics for guarded object queries.
//!
//! All metrics follow the naming convention: `perflib_reduction_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., objects_removed_total)
//! - **Histogram**: Distribution of values (e.g., reduction_duration_seconds)

use lazy_static::lazy_static;
use perflib_reduction::ReductionRecorder;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Histogram, HistogramOpts, Opts, Registry,
};
use std::time::Duration;

use crate::TelemetryError;

lazy_static! {
    /// Registry holding the reduction metrics
    pub static ref REGISTRY: Registry = Registry::new();

    /// Guarded query invocations by outcome
    pub static ref QUERIES: CounterVec = CounterVec::new(
        Opts::new("perflib_reduction_queries_total", "Guarded object query invocations"),
        &["outcome"]  // outcome: success/failure
    ).expect("metric creation failed");

    /// Objects returned to callers
    pub static ref OBJECTS_KEPT: Counter = Counter::new(
        "perflib_reduction_objects_kept_total",
        "Objects returned by guarded queries"
    ).expect("metric creation failed");

    /// Objects removed as disallowed
    pub static ref OBJECTS_REMOVED: Counter = Counter::new(
        "perflib_reduction_objects_removed_total",
        "Objects removed because their name index is disallowed"
    ).expect("metric creation failed");

    /// Reduction duration
    pub static ref REDUCTION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "perflib_reduction_duration_seconds",
            "Time spent removing disallowed objects"
        ).buckets(exponential_buckets(0.000_001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle returned once the metrics are registered
#[derive(Clone)]
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    /// Registry the reduction metrics live in
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the crate registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(QUERIES.clone()),
        Box::new(OBJECTS_KEPT.clone()),
        Box::new(OBJECTS_REMOVED.clone()),
        Box::new(REDUCTION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: REGISTRY.clone(),
    })
}

/// `ReductionRecorder` backed by the global Prometheus metrics
#[derive(Default, Debug, Clone, Copy)]
pub struct PrometheusRecorder;

impl PrometheusRecorder {
    pub fn new() -> Self {
        Self
    }
}

impl ReductionRecorder for PrometheusRecorder {
    fn record_query_failure(&self) {
        crate::metric_inc!(QUERIES, &["failure"]);
    }

    fn record_reduction(&self, kept: usize, removed: usize, duration: Duration) {
        crate::metric_inc!(QUERIES, &["success"]);
        OBJECTS_KEPT.inc_by(kept as f64);
        OBJECTS_REMOVED.inc_by(removed as f64);
        crate::metric_observe!(REDUCTION_DURATION, duration.as_secs_f64());
    }
}
