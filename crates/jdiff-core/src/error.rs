use thiserror::Error;

/// Errors that can occur while loading external text into a [`Value`](crate::Value).
///
/// The diff itself never fails; anything that is not valid JSON is rejected here,
/// before the differ runs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The provided input was not valid JSON.
    #[error("input not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// A float literal does not fit in a finite `f64`.
    #[error("input not valid JSON: number out of range: {0}")]
    NumberOutOfRange(String),
}
