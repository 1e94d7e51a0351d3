//! Service Layer - query guarding

pub mod guarded_query;

pub use guarded_query::{new_reductable_query, GuardedQuery};
