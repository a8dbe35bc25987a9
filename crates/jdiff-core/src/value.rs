use std::collections::BTreeMap;
use std::fmt;
use std::io;

use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::Value as JsonValue;

use crate::{hash::canonical_hash, Diff, DiffOptions, LoadError, Number};

const PRETTY_INDENT: &[u8] = b"    ";

/// Represents a parsed JSON document as seen by the diff engine.
///
/// Objects are stored in a [`BTreeMap`], so iteration (and therefore every
/// rendering) visits keys in lexicographic order regardless of the order in
/// which they were written.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, integer or float.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Value>),
    /// JSON object with deterministic key ordering.
    Object(BTreeMap<String, Value>),
}

/// The type of a [`Value`] as far as the differ is concerned.
///
/// Integers and floats are distinct kinds: a pair of values with different
/// kinds is never compared element by element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool,
    /// Number written without fraction or exponent.
    Integer,
    /// Number written with a fraction or exponent.
    Float,
    /// String.
    String,
    /// Array.
    Array,
    /// Object.
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

impl Value {
    /// Parses a JSON string.
    ///
    /// ```
    /// # use jdiff_core::Value;
    /// let value = Value::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(value, Value::Object(_)));
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, LoadError> {
        let value: JsonValue = serde_json::from_str(input)?;
        Self::try_from(value)
    }

    /// Parses JSON from raw bytes.
    ///
    /// ```
    /// # use jdiff_core::Value;
    /// let err = Value::from_json_slice(b"{not json").unwrap_err();
    /// assert!(err.to_string().starts_with("input not valid JSON"));
    /// ```
    pub fn from_json_slice(input: &[u8]) -> Result<Self, LoadError> {
        let value: JsonValue = serde_json::from_slice(input)?;
        Self::try_from(value)
    }

    /// Returns the kind used for type-mismatch detection.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(n) if n.is_integer() => ValueKind::Integer,
            Self::Number(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` for non-empty arrays and objects, which render across
    /// several lines.
    ///
    /// ```
    /// # use jdiff_core::Value;
    /// assert!(Value::from_json_str("[1]")?.is_multi_line());
    /// assert!(!Value::from_json_str("[]")?.is_multi_line());
    /// assert!(!Value::from_json_str("\"text\"")?.is_multi_line());
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn is_multi_line(&self) -> bool {
        match self {
            Self::Array(items) => !items.is_empty(),
            Self::Object(map) => !map.is_empty(),
            _ => false,
        }
    }

    /// Computes the canonical hash string.
    ///
    /// ```
    /// # use jdiff_core::Value;
    /// let lhs = Value::from_json_str("[1,[2,3]]")?;
    /// let rhs = Value::from_json_str("[[3,2],1]")?;
    /// assert_eq!(lhs.canonical_hash(), rhs.canonical_hash());
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn canonical_hash(&self) -> String {
        canonical_hash(self)
    }

    /// Computes the structural diff between two values.
    ///
    /// ```
    /// # use jdiff_core::{DiffOptions, Value};
    /// let lhs = Value::from_json_str("[1,2,3]")?;
    /// let rhs = Value::from_json_str("[3,2,1]")?;
    /// assert!(!lhs.diff(&rhs, &DiffOptions::default()).has_changes());
    /// assert!(lhs.diff(&rhs, &DiffOptions::default().keep_array_order()).has_changes());
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn diff(&self, other: &Self, options: &DiffOptions) -> Diff {
        crate::diff::diff_values(self, other, options)
    }

    /// Renders the value as a single-line JSON token. Characters outside
    /// printable ASCII are written as `\uXXXX` escapes.
    ///
    /// ```
    /// # use jdiff_core::Value;
    /// let value = Value::from_json_str("[\"caf\u{e9}\",1.5]")?;
    /// assert_eq!(value.to_compact_json(), "[\"caf\\u00e9\",1.5]");
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn to_compact_json(&self) -> String {
        write_json(self, AsciiEscaped(CompactFormatter))
    }

    /// Renders the value as pretty JSON with four spaces per indent level and
    /// sorted object keys.
    ///
    /// ```
    /// # use jdiff_core::Value;
    /// let value = Value::from_json_str("{\"b\":[true],\"a\":null}")?;
    /// assert_eq!(
    ///     value.to_pretty_json(),
    ///     "{\n    \"a\": null,\n    \"b\": [\n        true\n    ]\n}"
    /// );
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        write_json(self, AsciiEscaped(PrettyFormatter::with_indent(PRETTY_INDENT)))
    }
}

/// Quotes `text` as a compact JSON string literal.
pub(crate) fn quote_json_string(text: &str) -> String {
    write_json(text, AsciiEscaped(CompactFormatter))
}

fn write_json<T, F>(value: &T, formatter: F) -> String
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut buffer = Vec::with_capacity(64);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer).expect("in-memory JSON serialization");
    String::from_utf8(buffer).expect("serde_json emits UTF-8")
}

/// Wraps a formatter so that string contents outside printable ASCII are
/// written as `\uXXXX` escapes, surrogate pairs included.
struct AsciiEscaped<F>(F);

impl<F: Formatter> Formatter for AsciiEscaped<F> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if matches!(ch, ' '..='~') {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..index])?;
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = LoadError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Ok(match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(v) => Self::Bool(v),
            JsonValue::Number(num) => Self::Number(Number::try_from(&num)?),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(values) => {
                Self::Array(values.into_iter().map(Self::try_from).collect::<Result<_, _>>()?)
            }
            JsonValue::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| Self::try_from(value).map(|value| (key, value)))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Self::try_from(value).map_err(D::Error::custom)
    }
}
