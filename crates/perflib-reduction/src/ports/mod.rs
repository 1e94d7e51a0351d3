//! Ports Layer - Query trait
//!
//! `ObjectQuery` is the driven port: a zero-argument query against the
//! performance-counter data source. Guarded queries consume one and expose
//! another with the same object and error types, so they can be
//! substituted wherever the raw query was used.

use crate::domain::NameIndexed;

/// Zero-argument query returning objects or a data-source failure.
///
/// Implemented for every `Fn() -> Result<Vec<O>, E>`, so plain closures
/// are queries.
pub trait ObjectQuery {
    /// Objects produced by the query
    type Object: NameIndexed;
    /// Failure reported by the data source
    type Error;

    /// Run the query once
    fn query(&self) -> Result<Vec<Self::Object>, Self::Error>;
}

impl<F, O, E> ObjectQuery for F
where
    F: Fn() -> Result<Vec<O>, E>,
    O: NameIndexed,
{
    type Object = O;
    type Error = E;

    fn query(&self) -> Result<Vec<O>, E> {
        self()
    }
}
