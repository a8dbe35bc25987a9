use super::Diff;
use crate::Value;

/// Compares two scalars of the same kind.
pub(super) fn diff_scalars(lhs: &Value, rhs: &Value) -> Diff {
    if lhs == rhs {
        Diff::Unchanged(lhs.clone())
    } else {
        Diff::Changed { removed: lhs.clone(), added: rhs.clone() }
    }
}

/// Produces a whole-value replacement for values of different kinds.
pub(super) fn type_changed(lhs: &Value, rhs: &Value) -> Diff {
    Diff::TypeChanged { removed: lhs.clone(), added: rhs.clone() }
}
