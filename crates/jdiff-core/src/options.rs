use std::fmt;

use serde::{Deserialize, Serialize};

/// Controls how arrays are compared during a diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayOrder {
    /// Arrays are matched as multisets by canonical hash (default).
    #[default]
    Ignore,
    /// Arrays are compared position by position.
    Keep,
}

/// Configuration passed down every recursive diff call.
///
/// ```
/// # use jdiff_core::{ArrayOrder, DiffOptions};
/// let opts = DiffOptions::default();
/// assert_eq!(opts.array_order(), ArrayOrder::Ignore);
/// assert!(DiffOptions::default().keep_array_order().keeps_array_order());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    #[serde(default)]
    array_order: ArrayOrder,
}

impl DiffOptions {
    /// Returns the configured array comparison mode.
    #[must_use]
    pub fn array_order(&self) -> ArrayOrder {
        self.array_order
    }

    /// Returns `true` when arrays are compared positionally.
    #[must_use]
    pub fn keeps_array_order(&self) -> bool {
        matches!(self.array_order, ArrayOrder::Keep)
    }

    /// Sets the array comparison mode.
    #[must_use]
    pub fn with_array_order(mut self, order: ArrayOrder) -> Self {
        self.array_order = order;
        self
    }

    /// Shorthand for `with_array_order(ArrayOrder::Keep)`.
    #[must_use]
    pub fn keep_array_order(self) -> Self {
        self.with_array_order(ArrayOrder::Keep)
    }
}

impl fmt::Display for ArrayOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayOrder::Ignore => f.write_str("ignore"),
            ArrayOrder::Keep => f.write_str("keep"),
        }
    }
}
