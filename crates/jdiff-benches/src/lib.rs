//! Benchmark corpora for `jdiff`.
//!
//! Each corpus is generated deterministically so benchmark runs are
//! comparable without checking large fixtures into the repository.
//!
//! # Examples
//!
//! ```
//! use jdiff_core::DiffOptions;
//!
//! let corpus = jdiff_benches::available_corpora()
//!     .iter()
//!     .find(|corpus| corpus.name() == "config-tree")
//!     .expect("registered corpus");
//! let dataset = corpus.load()?;
//! assert!(dataset.diff(&DiffOptions::default()).has_changes());
//! # Ok::<(), jdiff_core::LoadError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use jdiff_core::{Diff, DiffOptions, LoadError, RenderConfig, Value};
use serde_json::{json, Map as JsonMap, Value as JsonValue};

const CONFIG_DEPTH: usize = 4;
const CONFIG_BREADTH: usize = 6;
const RECORD_COUNT: usize = 400;
const SERIES_LEN: usize = 2_000;

/// A named generator of a pair of documents.
#[derive(Debug)]
pub struct Corpus {
    name: &'static str,
    description: &'static str,
    generate: fn() -> (JsonValue, JsonValue),
}

impl Corpus {
    /// Short identifier used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human readable summary of what the corpus stresses.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Builds both documents of the corpus.
    pub fn load(&self) -> Result<Dataset, LoadError> {
        let (before, after) = (self.generate)();
        Ok(Dataset { before: Value::try_from(before)?, after: Value::try_from(after)? })
    }
}

/// Two loaded documents ready to be diffed.
#[derive(Clone, Debug)]
pub struct Dataset {
    before: Value,
    after: Value,
}

impl Dataset {
    /// The first document.
    #[must_use]
    pub fn before(&self) -> &Value {
        &self.before
    }

    /// The second document.
    #[must_use]
    pub fn after(&self) -> &Value {
        &self.after
    }

    /// Size of both documents in compact JSON form.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.before.to_compact_json().len() + self.after.to_compact_json().len()
    }

    /// Diffs the first document against the second.
    #[must_use]
    pub fn diff(&self, options: &DiffOptions) -> Diff {
        self.before.diff(&self.after, options)
    }

    /// Diffs and renders in one step.
    #[must_use]
    pub fn render(&self, options: &DiffOptions, config: &RenderConfig) -> String {
        self.diff(options).render(config)
    }
}

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    CORPORA
}

static CORPORA: &[Corpus] = &[
    Corpus {
        name: "config-tree",
        description: "deeply nested objects with a handful of changed leaves",
        generate: config_tree,
    },
    Corpus {
        name: "shuffled-records",
        description: "array of records reversed and partially edited",
        generate: shuffled_records,
    },
    Corpus {
        name: "numeric-series",
        description: "long array of integers with sparse edits and a longer tail",
        generate: numeric_series,
    },
];

fn config_tree() -> (JsonValue, JsonValue) {
    let before = config_level(CONFIG_DEPTH, 0, false);
    let after = config_level(CONFIG_DEPTH, 0, true);
    (before, after)
}

fn config_level(depth: usize, seed: usize, edited: bool) -> JsonValue {
    let mut map = JsonMap::new();
    for index in 0..CONFIG_BREADTH {
        let key = format!("key_{seed}_{index}");
        let value = if depth == 0 {
            let changed = edited && (seed + index) % 7 == 0;
            json!({
                "enabled": !changed,
                "limit": seed * 10 + index,
                "labels": ["alpha", "beta", format!("node-{seed}")],
            })
        } else {
            config_level(depth - 1, seed * CONFIG_BREADTH + index, edited)
        };
        map.insert(key, value);
    }
    JsonValue::Object(map)
}

fn shuffled_records() -> (JsonValue, JsonValue) {
    let records: Vec<JsonValue> = (0..RECORD_COUNT).map(|id| record(id, false)).collect();
    let mut edited: Vec<JsonValue> = (0..RECORD_COUNT).map(|id| record(id, id % 25 == 0)).collect();
    edited.reverse();
    (JsonValue::Array(records), JsonValue::Array(edited))
}

fn record(id: usize, edited: bool) -> JsonValue {
    json!({
        "id": id,
        "name": format!("record-{id}"),
        "score": if edited { 0.5 } else { 1.5 },
        "tags": [format!("t{}", id % 5), format!("t{}", id % 3)],
    })
}

fn numeric_series() -> (JsonValue, JsonValue) {
    let before: Vec<JsonValue> = (0..SERIES_LEN).map(|n| json!(n)).collect();
    let after: Vec<JsonValue> = (0..SERIES_LEN + SERIES_LEN / 10)
        .map(|n| if n % 97 == 0 { json!(n + 1) } else { json!(n) })
        .collect();
    (JsonValue::Array(before), JsonValue::Array(after))
}
