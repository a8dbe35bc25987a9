use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use super::{ArrayEntry, Diff, Sign};
use crate::{ArrayOrder, DiffOptions, Value};

pub(super) fn diff_lists(lhs: &[Value], rhs: &[Value], options: &DiffOptions) -> Diff {
    trace!(
        lhs_len = lhs.len(),
        rhs_len = rhs.len(),
        order = %options.array_order(),
        "diffing arrays"
    );
    let entries = match options.array_order() {
        ArrayOrder::Ignore => diff_unordered(lhs, rhs),
        ArrayOrder::Keep => diff_ordered(lhs, rhs),
    };
    Diff::Array(entries)
}

/// Matches elements by canonical hash. Elements sharing a hash collapse into
/// one entry and the last of them is kept; for a hash present on both sides
/// the element from `rhs` is rendered.
fn diff_unordered(lhs: &[Value], rhs: &[Value]) -> Vec<ArrayEntry> {
    let lhs_by_hash = index_by_hash(lhs);
    let rhs_by_hash = index_by_hash(rhs);
    let hashes: BTreeSet<&String> = lhs_by_hash.keys().chain(rhs_by_hash.keys()).collect();

    let mut entries = Vec::with_capacity(hashes.len());
    for hash in hashes {
        let entry = match (lhs_by_hash.get(hash), rhs_by_hash.get(hash)) {
            (Some(_), Some(right)) => ArrayEntry::new(Sign::Unchanged, right),
            (Some(left), None) => ArrayEntry::new(Sign::Removed, left),
            (None, Some(right)) => ArrayEntry::new(Sign::Added, right),
            (None, None) => continue,
        };
        entries.push(entry);
    }
    entries
}

fn index_by_hash(values: &[Value]) -> BTreeMap<String, &Value> {
    values.iter().map(|value| (value.canonical_hash(), value)).collect()
}

/// Compares elements position by position. Surplus elements of the longer
/// array are reported one per index: removed when `lhs` is longer, added when
/// `rhs` is longer.
fn diff_ordered(lhs: &[Value], rhs: &[Value]) -> Vec<ArrayEntry> {
    let mut entries = Vec::with_capacity(lhs.len().max(rhs.len()) * 2);
    for (left, right) in lhs.iter().zip(rhs) {
        if left.canonical_hash() == right.canonical_hash() {
            entries.push(ArrayEntry::new(Sign::Unchanged, left));
        } else {
            entries.push(ArrayEntry::new(Sign::Removed, left));
            entries.push(ArrayEntry::new(Sign::Added, right));
        }
    }

    let shared = lhs.len().min(rhs.len());
    entries.extend(lhs[shared..].iter().map(|left| ArrayEntry::new(Sign::Removed, left)));
    entries.extend(rhs[shared..].iter().map(|right| ArrayEntry::new(Sign::Added, right)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(json: &str) -> Vec<Value> {
        match Value::from_json_str(json).unwrap() {
            Value::Array(items) => items,
            other => panic!("expected array, got {other:?}"),
        }
    }

    fn value(json: &str) -> Value {
        Value::from_json_str(json).unwrap()
    }

    fn signs(diff: &Diff) -> Vec<(char, String)> {
        let Diff::Array(entries) = diff else {
            panic!("expected array diff");
        };
        entries.iter().map(|e| (e.sign.as_char(), e.value.to_compact_json())).collect()
    }

    fn unordered(lhs: &str, rhs: &str) -> Diff {
        diff_lists(&array(lhs), &array(rhs), &DiffOptions::default())
    }

    fn ordered(lhs: &str, rhs: &str) -> Diff {
        diff_lists(&array(lhs), &array(rhs), &DiffOptions::default().keep_array_order())
    }

    #[test]
    fn unordered_ignores_positions() {
        let diff = unordered("[1,2,3]", "[3,2,1]");
        assert!(!diff.has_changes());
        assert_eq!(
            signs(&diff),
            [(' ', "1".to_string()), (' ', "2".to_string()), (' ', "3".to_string())]
        );
    }

    #[test]
    fn unordered_entries_follow_hash_order() {
        // Hash strings compare bytewise: `i10` < `i9` < `li1]` < `s"a"`.
        let diff = unordered("[9,\"a\",[1]]", "[10,\"a\"]");
        assert_eq!(
            signs(&diff),
            [
                ('+', "10".to_string()),
                ('-', "9".to_string()),
                ('-', "[1]".to_string()),
                (' ', "\"a\"".to_string()),
            ]
        );
    }

    #[test]
    fn unordered_common_element_comes_from_second_array() {
        let diff = unordered("[[1,2]]", "[[2,1]]");
        let Diff::Array(entries) = diff else {
            panic!("expected array diff");
        };
        assert_eq!(entries, vec![ArrayEntry::new(Sign::Unchanged, &value("[2,1]"))]);
    }

    #[test]
    fn unordered_duplicates_collapse_into_one_entry() {
        // Known limitation: multiplicity is lost when matching by hash.
        let diff = unordered("[1,1,2]", "[1,2]");
        assert!(!diff.has_changes());
        assert_eq!(signs(&diff), [(' ', "1".to_string()), (' ', "2".to_string())]);
    }

    #[test]
    fn ordered_reports_pairs_by_index() {
        let diff = ordered("[1,2,3]", "[3,2,1]");
        assert_eq!(
            signs(&diff),
            [
                ('-', "1".to_string()),
                ('+', "3".to_string()),
                (' ', "2".to_string()),
                ('-', "3".to_string()),
                ('+', "1".to_string()),
            ]
        );
    }

    #[test]
    fn ordered_nested_arrays_still_match_by_hash() {
        let diff = ordered("[[1,2]]", "[[2,1]]");
        assert!(!diff.has_changes());
    }

    #[test]
    fn ordered_surplus_in_first_array_is_removed() {
        let diff = ordered("[1,2,3,4]", "[1,2]");
        assert_eq!(
            signs(&diff),
            [
                (' ', "1".to_string()),
                (' ', "2".to_string()),
                ('-', "3".to_string()),
                ('-', "4".to_string()),
            ]
        );
    }

    #[test]
    fn ordered_surplus_in_second_array_is_added() {
        let diff = ordered("[1]", "[1,{\"a\":true},null]");
        assert_eq!(
            signs(&diff),
            [
                (' ', "1".to_string()),
                ('+', "{\"a\":true}".to_string()),
                ('+', "null".to_string()),
            ]
        );
    }

    #[test]
    fn empty_arrays_have_no_entries() {
        assert_eq!(unordered("[]", "[]"), Diff::Array(Vec::new()));
        assert_eq!(ordered("[]", "[]"), Diff::Array(Vec::new()));
    }
}
