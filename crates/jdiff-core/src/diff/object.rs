use std::collections::{BTreeMap, BTreeSet};

use super::{diff_impl, Diff, KeyChange, ObjectEntry};
use crate::{DiffOptions, Value};

pub(super) fn diff_objects(
    lhs: &BTreeMap<String, Value>,
    rhs: &BTreeMap<String, Value>,
    options: &DiffOptions,
) -> Diff {
    let keys: BTreeSet<&String> = lhs.keys().chain(rhs.keys()).collect();

    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        let change = match (lhs.get(key), rhs.get(key)) {
            (Some(left), Some(right)) => KeyChange::Common(diff_impl(left, right, options)),
            (Some(left), None) => KeyChange::Removed(left.clone()),
            (None, Some(right)) => KeyChange::Added(right.clone()),
            (None, None) => continue,
        };
        entries.push(ObjectEntry { key: key.clone(), change });
    }

    Diff::Object(entries)
}
