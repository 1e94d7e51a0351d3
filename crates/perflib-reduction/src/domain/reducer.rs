//! Object reduction
//!
//! Removes objects whose name index is on the disallowed list. The list is
//! optional: `None` (nothing configured) and `Some(&[])` (configured, empty)
//! both remove nothing.
//!
//! ## Invariants
//!
//! - Inputs are never mutated; a new sequence is produced.
//! - Retained objects keep their relative order.
//! - An object is removed iff its name index equals an entry of the list.

use super::object::NameIndexed;

/// Kept/removed counts of a single reduction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReductionOutcome {
    pub kept: usize,
    pub removed: usize,
}

/// Returns true if `object` must be dropped from a query result.
///
/// Linear scan; disallowed lists are small and rarely change.
pub fn remove_object<O>(object: &O, disallowed_ids: Option<&[u32]>) -> bool
where
    O: NameIndexed + ?Sized,
{
    let ids = match disallowed_ids {
        Some(ids) if !ids.is_empty() => ids,
        _ => return false,
    };

    ids.contains(&object.name_index())
}

/// Returns the objects whose name index is not disallowed, in input order.
pub fn reduce_objects<O>(objects: &[O], disallowed_ids: Option<&[u32]>) -> Vec<O>
where
    O: NameIndexed + Clone,
{
    objects
        .iter()
        .filter(|object| !remove_object(*object, disallowed_ids))
        .cloned()
        .collect()
}

/// Owning variant of [`reduce_objects`]; avoids cloning object payloads.
pub fn retain_allowed<O>(objects: Vec<O>, disallowed_ids: Option<&[u32]>) -> Vec<O>
where
    O: NameIndexed,
{
    reduce_with_outcome(objects, disallowed_ids).0
}

/// Owning reduction that also reports how many objects were dropped.
pub fn reduce_with_outcome<O>(
    objects: Vec<O>,
    disallowed_ids: Option<&[u32]>,
) -> (Vec<O>, ReductionOutcome)
where
    O: NameIndexed,
{
    let total = objects.len();
    let kept: Vec<O> = objects
        .into_iter()
        .filter(|object| {
            let remove = remove_object(object, disallowed_ids);
            if remove {
                tracing::trace!(name_index = object.name_index(), "Removing disallowed object");
            }
            !remove
        })
        .collect();

    let outcome = ReductionOutcome {
        kept: kept.len(),
        removed: total - kept.len(),
    };
    (kept, outcome)
}
