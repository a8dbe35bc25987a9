//! Canonical hashing of values.
//!
//! The "hash" is a canonical serialization rather than a digest: two values
//! produce the same string exactly when they are equal with every array
//! compared as an unordered multiset. Arrays sort their element hashes before
//! concatenation, objects are visited in key order.
//!
//! Every encoding is self-delimiting, so concatenations cannot collide:
//! strings and keys are quoted JSON literals, arrays end with `]` and objects
//! end with `}`.

use crate::value::quote_json_string;
use crate::Value;

/// Computes the canonical hash string of a value.
///
/// ```
/// # use jdiff_core::{canonical_hash, Value};
/// let value = Value::from_json_str("{\"b\":[2,1],\"a\":null}")?;
/// assert_eq!(canonical_hash(&value), "d\"a\"N\"b\"li1i2]}");
/// # Ok::<(), jdiff_core::LoadError>(())
/// ```
#[must_use]
pub fn canonical_hash(value: &Value) -> String {
    let mut out = String::new();
    write_hash(value, &mut out);
    out
}

fn write_hash(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            out.push('d');
            for (key, item) in map {
                out.push_str(&quote_json_string(key));
                write_hash(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            let mut hashes: Vec<String> = items.iter().map(canonical_hash).collect();
            hashes.sort_unstable();
            out.push('l');
            for hash in hashes {
                out.push_str(&hash);
            }
            out.push(']');
        }
        Value::Null => out.push('N'),
        Value::Bool(true) => out.push_str("bT"),
        Value::Bool(false) => out.push_str("bF"),
        Value::String(s) => {
            out.push('s');
            out.push_str(&quote_json_string(s));
        }
        Value::Number(n) => {
            out.push(if n.is_integer() { 'i' } else { 'f' });
            out.push_str(&n.to_string());
        }
    }
}
