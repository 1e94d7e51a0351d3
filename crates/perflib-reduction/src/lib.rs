//! # Perflib Reduction
//!
//! Object-reduction and query-guarding layer for a performance-counter
//! metrics pipeline.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure reduction logic, no I/O
//!   - `PerfObject`: Performance-counter object, identified by `name_index`
//!   - `remove_object`: Single membership decision
//!   - `reduce_objects` / `retain_allowed`: Stable filter over a result
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `ObjectQuery`: Zero-argument query against the data source
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `GuardedQuery`: Applies the policy to a raw `ObjectQuery`
//!   - `new_reductable_query`: Closure form of the same wrapper
//!
//! - **Config** (`config`): `ReductionConfig` from env/TOML and the shared
//!   `ReductionPolicy` handle
//!
//! ## Invariants
//!
//! - Raw query failures are returned unchanged, whatever the strict flag.
//! - Reduction preserves the relative order of retained objects.
//! - An object is removed iff its `name_index` is on the disallowed list.
//! - Absent and empty disallowed lists both remove nothing.
//!
//! ## Usage Example
//!
//! ```ignore
//! use perflib_reduction::{new_reductable_query, PerfObject, QueryError};
//!
//! let raw = || -> Result<Vec<PerfObject>, QueryError> {
//!     Ok(vec![PerfObject::new("Processor", 238), PerfObject::new("System", 2)])
//! };
//!
//! let query = new_reductable_query(raw, true, Some(vec![2]));
//! assert_eq!(query()?.len(), 1);
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use config::{ReductionConfig, ReductionConfigBuilder, ReductionPolicy};
pub use domain::{
    reduce_objects, remove_object, retain_allowed, NameIndexed, PerfCounterDef, PerfInstance,
    PerfObject, ReductionOutcome,
};
pub use error::{ConfigError, QueryError};
pub use metrics::{NoOpRecorder, ReductionMetrics, ReductionRecorder, ReductionSnapshot};
pub use ports::ObjectQuery;
pub use service::{new_reductable_query, GuardedQuery};
