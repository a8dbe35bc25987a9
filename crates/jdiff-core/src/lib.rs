//! Structural JSON diff engine.
//!
//! `jdiff-core` compares two JSON documents while ignoring object key order
//! and, unless asked otherwise, array order. The result is a [`Diff`] tree
//! that renders to a sign-prefixed, JSON-shaped text format.
//!
//! ```
//! use jdiff_core::{DiffOptions, RenderConfig, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = Value::from_json_str("{\"name\":\"jdiff\",\"tags\":[\"a\",\"b\"]}")?;
//!     let target = Value::from_json_str("{\"name\":\"jdiff\",\"tags\":[\"b\",\"a\"]}")?;
//!     let diff = base.diff(&target, &DiffOptions::default());
//!     assert!(!diff.has_changes());
//!
//!     let ordered = base.diff(&target, &DiffOptions::default().keep_array_order());
//!     let rendered = ordered.render(&RenderConfig::default());
//!     assert!(rendered.contains("-                 \"a\","));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
mod error;
mod hash;
mod number;
mod options;
mod value;

pub use diff::{
    diff_values, render_document, ArrayEntry, Diff, KeyChange, ObjectEntry, RenderConfig, Sign,
};
pub use error::LoadError;
pub use hash::canonical_hash;
pub use number::Number;
pub use options::{ArrayOrder, DiffOptions};
pub use value::{Value, ValueKind};

/// Returns the semantic version of the `jdiff-core` crate.
///
/// ```
/// assert!(!jdiff_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
