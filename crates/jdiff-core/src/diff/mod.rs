//! Diff data structures and algorithms.
//!
//! A diff is computed in one recursive walk over both documents and stored as
//! a [`Diff`] tree. Rendering is a second walk over that tree, see
//! [`Diff::render`].

mod list;
mod object;
mod primitives;
mod render;

pub use render::RenderConfig;

use serde::Serialize;
use tracing::debug;

use crate::{DiffOptions, Value};

/// The marker in front of every rendered entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Present on both sides.
    Unchanged,
    /// Only present in the first document.
    Removed,
    /// Only present in the second document.
    Added,
}

impl Sign {
    /// Returns the character used in the text format (` `, `-` or `+`).
    ///
    /// ```
    /// # use jdiff_core::Sign;
    /// assert_eq!(Sign::Removed.as_char(), '-');
    /// ```
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Unchanged => ' ',
            Self::Removed => '-',
            Self::Added => '+',
        }
    }
}

/// Result of comparing two values.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Diff {
    /// Equal scalars of the same kind.
    Unchanged(Value),
    /// Scalars of the same kind with different values.
    Changed {
        /// Value in the first document.
        removed: Value,
        /// Value in the second document.
        added: Value,
    },
    /// Values of different kinds; both are kept whole.
    TypeChanged {
        /// Value in the first document.
        removed: Value,
        /// Value in the second document.
        added: Value,
    },
    /// Two objects, one entry per key of either side, sorted by key.
    Object(Vec<ObjectEntry>),
    /// Two arrays, entries in the order they are rendered.
    Array(Vec<ArrayEntry>),
}

/// One key of an object diff.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectEntry {
    /// The object key.
    pub key: String,
    /// What happened to the value under `key`.
    pub change: KeyChange,
}

/// Change recorded for an object key.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum KeyChange {
    /// Key only present in the first object.
    Removed(Value),
    /// Key only present in the second object.
    Added(Value),
    /// Key present in both; the values are diffed recursively.
    Common(Diff),
}

/// One entry of an array diff.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrayEntry {
    /// Whether the element is kept, removed or added.
    pub sign: Sign,
    /// The element as rendered.
    pub value: Value,
}

impl ArrayEntry {
    pub(crate) fn new(sign: Sign, value: &Value) -> Self {
        Self { sign, value: value.clone() }
    }
}

impl Diff {
    /// Returns `true` when anything was removed or added anywhere in the tree.
    ///
    /// ```
    /// # use jdiff_core::{DiffOptions, Value};
    /// let lhs = Value::from_json_str("{\"a\":[1,2]}")?;
    /// let rhs = Value::from_json_str("{\"a\":[2,1]}")?;
    /// assert!(!lhs.diff(&rhs, &DiffOptions::default()).has_changes());
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn has_changes(&self) -> bool {
        match self {
            Self::Unchanged(_) => false,
            Self::Changed { .. } | Self::TypeChanged { .. } => true,
            Self::Object(entries) => entries.iter().any(|entry| match &entry.change {
                KeyChange::Common(diff) => diff.has_changes(),
                KeyChange::Removed(_) | KeyChange::Added(_) => true,
            }),
            Self::Array(entries) => entries.iter().any(|entry| entry.sign != Sign::Unchanged),
        }
    }

    /// Collects every value rendered with a `-` sign, in rendering order.
    #[must_use]
    pub fn removed_values(&self) -> Vec<&Value> {
        let mut values = Vec::new();
        self.collect(Sign::Removed, &mut values);
        values
    }

    /// Collects every value rendered with a `+` sign, in rendering order.
    #[must_use]
    pub fn added_values(&self) -> Vec<&Value> {
        let mut values = Vec::new();
        self.collect(Sign::Added, &mut values);
        values
    }

    fn collect<'a>(&'a self, sign: Sign, values: &mut Vec<&'a Value>) {
        match self {
            Self::Unchanged(_) => {}
            Self::Changed { removed, added } | Self::TypeChanged { removed, added } => {
                match sign {
                    Sign::Removed => values.push(removed),
                    Sign::Added => values.push(added),
                    Sign::Unchanged => {}
                }
            }
            Self::Object(entries) => {
                for entry in entries {
                    match (&entry.change, sign) {
                        (KeyChange::Removed(value), Sign::Removed)
                        | (KeyChange::Added(value), Sign::Added) => values.push(value),
                        (KeyChange::Common(diff), _) => diff.collect(sign, values),
                        _ => {}
                    }
                }
            }
            Self::Array(entries) => {
                values.extend(entries.iter().filter(|e| e.sign == sign).map(|e| &e.value));
            }
        }
    }

    /// Renders the complete text diff, ending with a single newline.
    ///
    /// ```
    /// # use jdiff_core::{DiffOptions, RenderConfig, Value};
    /// let lhs = Value::from_json_str("{\"a\":1}")?;
    /// let rhs = Value::from_json_str("{\"a\":2}")?;
    /// let diff = lhs.diff(&rhs, &DiffOptions::default());
    /// assert_eq!(
    ///     diff.render(&RenderConfig::default()),
    ///     "  {\n          \"a\": \n-             1,\n+             2\n      }\n"
    /// );
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn render(&self, config: &RenderConfig) -> String {
        render::render_document(self, config)
    }

    /// Serializes the diff tree as JSON for debugging.
    pub fn render_raw(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub(crate) fn opens_block(&self) -> bool {
        match self {
            Self::Object(entries) => !entries.is_empty(),
            Self::Array(entries) => !entries.is_empty(),
            _ => false,
        }
    }
}

/// Computes the structural diff between two values.
#[must_use]
pub fn diff_values(lhs: &Value, rhs: &Value, options: &DiffOptions) -> Diff {
    debug!(
        lhs = %lhs.kind(),
        rhs = %rhs.kind(),
        array_order = %options.array_order(),
        "diffing documents"
    );
    let diff = diff_impl(lhs, rhs, options);
    debug!(changed = diff.has_changes(), "diff complete");
    diff
}

/// Diffs two documents and renders the result in one call.
///
/// ```
/// # use jdiff_core::{render_document, DiffOptions, RenderConfig, Value};
/// let lhs = Value::from_json_str("[1,2,3]")?;
/// let rhs = Value::from_json_str("[3,2,1]")?;
/// let text = render_document(&lhs, &rhs, &DiffOptions::default(), &RenderConfig::default());
/// assert_eq!(text, "  [\n          1,\n          2,\n          3\n      ]\n");
/// # Ok::<(), jdiff_core::LoadError>(())
/// ```
#[must_use]
pub fn render_document(
    lhs: &Value,
    rhs: &Value,
    options: &DiffOptions,
    config: &RenderConfig,
) -> String {
    diff_values(lhs, rhs, options).render(config)
}

pub(super) fn diff_impl(lhs: &Value, rhs: &Value, options: &DiffOptions) -> Diff {
    if lhs.kind() != rhs.kind() {
        return primitives::type_changed(lhs, rhs);
    }

    match (lhs, rhs) {
        (Value::Object(left), Value::Object(right)) => object::diff_objects(left, right, options),
        (Value::Array(left), Value::Array(right)) => list::diff_lists(left, right, options),
        _ => primitives::diff_scalars(lhs, rhs),
    }
}
