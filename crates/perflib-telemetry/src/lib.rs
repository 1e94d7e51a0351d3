//! # Perflib Telemetry
//!
//! Logging and Prometheus instrumentation for guarded object queries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use perflib_reduction::{GuardedQuery, ReductionConfig};
//! use perflib_telemetry::{init_telemetry, PrometheusRecorder, TelemetryConfig};
//! use std::sync::Arc;
//!
//! let _metrics = init_telemetry(&TelemetryConfig::from_env())?;
//!
//! let guarded = GuardedQuery::new(raw_query, ReductionConfig::from_env())
//!     .with_recorder(Arc::new(PrometheusRecorder::new()));
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `perflib-exporter` | Service name in logs |
//! | `PERFLIB_LOG_LEVEL` | `info` | Log level filter |
//! | `PERFLIB_JSON_LOGS` | `false` | JSON log output |
//! | `PERFLIB_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{register_metrics, MetricsHandle, PrometheusRecorder};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics, then install the logging subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<MetricsHandle, TelemetryError> {
    let metrics = register_metrics()?;
    init_logging(config)?;
    Ok(metrics)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Convenience macro for recording a metric with a value.
#[macro_export]
macro_rules! metric_observe {
    ($metric:expr, $value:expr) => {
        $metric.observe($value)
    };
    ($metric:expr, $labels:expr, $value:expr) => {
        $metric.with_label_values($labels).observe($value)
    };
}
