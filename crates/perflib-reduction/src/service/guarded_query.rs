//! Guarded Query
//!
//! Wraps a raw [`ObjectQuery`] so that every invocation:
//!
//! 1. runs the raw query,
//! 2. returns its error unchanged if it failed (in strict and non-strict
//!    mode alike),
//! 3. otherwise removes disallowed objects when strict mode is on and
//!    returns the result.
//!
//! Non-strict mode passes successful results through untouched. The wrapper
//! keeps no state between invocations; settings are read from the shared
//! [`ReductionPolicy`] on each call.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{ReductionConfig, ReductionPolicy};
use crate::domain::{reduce_with_outcome, NameIndexed, ReductionOutcome};
use crate::metrics::{NoOpRecorder, ReductionRecorder};
use crate::ports::ObjectQuery;

/// A query that applies the disallowed-object policy to its raw query.
pub struct GuardedQuery<Q> {
    inner: Q,
    policy: ReductionPolicy,
    recorder: Arc<dyn ReductionRecorder>,
}

impl<Q: ObjectQuery> GuardedQuery<Q> {
    /// Wrap `inner`, reading settings from `policy` on every call
    pub fn new(inner: Q, policy: impl Into<ReductionPolicy>) -> Self {
        Self {
            inner,
            policy: policy.into(),
            recorder: Arc::new(NoOpRecorder),
        }
    }

    /// Report invocations to `recorder`
    pub fn with_recorder(mut self, recorder: Arc<dyn ReductionRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Settings handle shared with the configuration loader
    pub fn policy(&self) -> &ReductionPolicy {
        &self.policy
    }

    /// Unwrap the raw query
    pub fn into_inner(self) -> Q {
        self.inner
    }

    fn reduce(&self, objects: Vec<Q::Object>) -> (Vec<Q::Object>, ReductionOutcome) {
        self.policy.with_config(|config| {
            if config.strict {
                reduce_with_outcome(objects, config.disallowed())
            } else {
                let kept = objects.len();
                (objects, ReductionOutcome { kept, removed: 0 })
            }
        })
    }
}

impl<Q: ObjectQuery> ObjectQuery for GuardedQuery<Q> {
    type Object = Q::Object;
    type Error = Q::Error;

    fn query(&self) -> Result<Vec<Self::Object>, Self::Error> {
        let objects = match self.inner.query() {
            Ok(objects) => objects,
            Err(e) => {
                tracing::warn!(strict = self.policy.is_strict(), "Raw object query failed");
                self.recorder.record_query_failure();
                return Err(e);
            }
        };

        let start = Instant::now();
        let (objects, outcome) = self.reduce(objects);
        self.recorder
            .record_reduction(outcome.kept, outcome.removed, start.elapsed());

        tracing::debug!(
            kept = outcome.kept,
            removed = outcome.removed,
            "Object query reduced"
        );

        Ok(objects)
    }
}

impl<Q> fmt::Debug for GuardedQuery<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedQuery")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Turn a raw query function into one that applies the reduction policy.
///
/// The returned closure has the same signature as `query` and can replace
/// it anywhere. `strict` and `disallowed_ids` are fixed at construction;
/// use [`GuardedQuery`] with a shared [`ReductionPolicy`] for live updates.
pub fn new_reductable_query<F, O, E>(
    query: F,
    strict: bool,
    disallowed_ids: Option<Vec<u32>>,
) -> impl Fn() -> Result<Vec<O>, E>
where
    F: Fn() -> Result<Vec<O>, E>,
    O: NameIndexed,
{
    let guarded = GuardedQuery::new(query, ReductionConfig::new(strict, disallowed_ids));
    move || guarded.query()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PerfObject;
    use crate::error::QueryError;
    use crate::metrics::ReductionMetrics;

    fn objects(ids: &[u32]) -> Vec<PerfObject> {
        ids.iter()
            .map(|id| PerfObject::new(format!("object-{id}"), *id))
            .collect()
    }

    fn indices(objects: &[PerfObject]) -> Vec<u32> {
        objects.iter().map(|o| o.name_index).collect()
    }

    fn failing() -> Result<Vec<PerfObject>, QueryError> {
        Err(QueryError::Unavailable("test".to_string()))
    }

    #[test]
    fn test_error_propagates_in_both_modes() {
        for strict in [true, false] {
            let query = new_reductable_query(failing, strict, None);
            assert_eq!(
                query(),
                Err(QueryError::Unavailable("test".to_string())),
                "strict = {strict}"
            );
        }
    }

    #[test]
    fn test_error_propagates_with_disallowed_ids() {
        let query = new_reductable_query(failing, true, Some(vec![123]));
        assert!(query().is_err());
    }

    #[test]
    fn test_strict_reduce() {
        let query = new_reductable_query(|| Ok::<_, QueryError>(objects(&[123])), true, Some(vec![123]));
        assert_eq!(query().expect("query succeeds"), Vec::<PerfObject>::new());
    }

    #[test]
    fn test_strict_noop() {
        let query = new_reductable_query(|| Ok::<_, QueryError>(objects(&[123])), true, Some(vec![234]));
        assert_eq!(indices(&query().expect("query succeeds")), vec![123]);
    }

    #[test]
    fn test_strict_partial_keeps_order() {
        let query = new_reductable_query(
            || Ok::<_, QueryError>(objects(&[123, 234])),
            true,
            Some(vec![234]),
        );
        assert_eq!(indices(&query().expect("query succeeds")), vec![123]);
    }

    #[test]
    fn test_not_strict_passes_through() {
        let query = new_reductable_query(|| Ok::<_, QueryError>(objects(&[123])), false, Some(vec![123]));
        assert_eq!(indices(&query().expect("query succeeds")), vec![123]);
    }

    #[test]
    fn test_empty_result_without_list() {
        for ids in [None, Some(vec![])] {
            let query = new_reductable_query(|| Ok::<_, QueryError>(Vec::<PerfObject>::new()), true, ids);
            assert!(query().expect("query succeeds").is_empty());
        }
    }

    #[test]
    fn test_policy_updates_apply_to_next_query() {
        let policy = ReductionPolicy::new(ReductionConfig::new(true, None));
        let guarded = GuardedQuery::new(|| Ok::<_, QueryError>(objects(&[1, 2, 3])), policy.clone());

        assert_eq!(indices(&guarded.query().unwrap()), vec![1, 2, 3]);

        policy.set_disallowed_ids(Some(vec![2]));
        assert_eq!(indices(&guarded.query().unwrap()), vec![1, 3]);

        policy.set_strict(false);
        assert_eq!(indices(&guarded.query().unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_recorder_sees_outcomes() {
        let metrics = Arc::new(ReductionMetrics::new());
        let guarded = GuardedQuery::new(
            || Ok::<_, QueryError>(objects(&[1, 2, 3])),
            ReductionConfig::new(true, Some(vec![3])),
        )
        .with_recorder(metrics.clone());

        guarded.query().unwrap();
        guarded.query().unwrap();

        let failing_guard =
            GuardedQuery::new(failing, ReductionConfig::default()).with_recorder(metrics.clone());
        assert!(failing_guard.query().is_err());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries_total, 3);
        assert_eq!(snapshot.query_failures, 1);
        assert_eq!(snapshot.objects_kept, 4);
        assert_eq!(snapshot.objects_removed, 2);
    }

    #[test]
    fn test_guarded_queries_nest() {
        let inner = GuardedQuery::new(
            || Ok::<_, QueryError>(objects(&[1, 2, 3])),
            ReductionConfig::new(true, Some(vec![1])),
        );
        let outer = GuardedQuery::new(inner, ReductionConfig::new(true, Some(vec![3])));
        assert_eq!(indices(&outer.query().unwrap()), vec![2]);
    }
}
