//! Domain Layer - Pure reduction logic
//!
//! This layer contains:
//! - The performance-counter object model
//! - The disallowed-object reducer
//!
//! RULES:
//! - No I/O operations
//! - No shared state
//! - Pure functions only

pub mod object;
pub mod reducer;

pub use object::{NameIndexed, PerfCounterDef, PerfInstance, PerfObject};
pub use reducer::{
    reduce_objects, reduce_with_outcome, remove_object, retain_allowed, ReductionOutcome,
};
