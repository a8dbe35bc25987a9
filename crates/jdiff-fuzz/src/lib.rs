//! Fuzzing harnesses for `jdiff`.
//!
//! Each public function accepts raw bytes so it can be driven from
//! `cargo fuzz` targets as well as from plain unit tests. Malformed input is
//! ignored; broken invariants of the diff engine panic so the fuzzer reports
//! them.
//!
//! # Examples
//!
//! Run the parsing harness on a JSON snippet:
//!
//! ```
//! jdiff_fuzz::fuzz_parse(b"{\"a\":1}");
//! ```
//!
//! Invoke the diff harness on deterministic input:
//!
//! ```
//! jdiff_fuzz::fuzz_diff(&[1, 2, 3, 4]);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use jdiff_core::{DiffOptions, RenderConfig, Value};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;

/// Feeds arbitrary bytes through the JSON loader and checks that a
/// successfully parsed value survives a compact round trip.
///
/// ```
/// jdiff_fuzz::fuzz_parse(b"[1, 2.5, \"x\"]");
/// ```
pub fn fuzz_parse(data: &[u8]) {
    let Ok(value) = Value::from_json_slice(data) else {
        return;
    };
    let reparsed = Value::from_json_str(&value.to_compact_json())
        .expect("compact output of a parsed value is valid JSON");
    assert_eq!(reparsed.canonical_hash(), value.canonical_hash());
}

/// Diffs randomly generated documents in both array modes and checks the
/// engine's invariants on the result.
///
/// ```
/// jdiff_fuzz::fuzz_diff(b"seed");
/// ```
pub fn fuzz_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(lhs) = random_value(&mut unstructured) else {
        return;
    };
    let Some(rhs) = random_value(&mut unstructured) else {
        return;
    };

    for options in [DiffOptions::default(), DiffOptions::default().keep_array_order()] {
        let forward = lhs.diff(&rhs, &options);
        let rendered = forward.render(&RenderConfig::default());
        assert!(rendered.ends_with('\n') && !rendered.ends_with("\n\n"));

        let backward = rhs.diff(&lhs, &options);
        assert_eq!(forward.removed_values().len(), backward.added_values().len());
        assert_eq!(forward.added_values().len(), backward.removed_values().len());

        assert!(!lhs.diff(&lhs, &options).has_changes());
    }
}

fn random_value(unstructured: &mut Unstructured<'_>) -> Option<Value> {
    let json = json_value_from_unstructured(unstructured, 0).ok()?;
    Value::try_from(json).ok()
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    let choice = unstructured.int_in_range::<u8>(0..=5)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        3 => Ok(JsonValue::String(random_string(unstructured)?)),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = random_string(unstructured)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    let choice = unstructured.int_in_range::<u8>(0..=3)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        let int = unstructured.arbitrary::<i64>()?;
        Ok(JsonNumber::from(int))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}
