use std::fmt;

use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::Number as JsonNumber;

use crate::LoadError;

/// A JSON number that remembers whether it was written as an integer or a float.
///
/// `1` and `1.0` are different values: they hash differently and are treated
/// as different types by the differ. Integers outside the 64-bit range keep
/// their exact digits.
///
/// ```
/// # use jdiff_core::Number;
/// let int = Number::from(1_u64);
/// let float = Number::from(1.0);
/// assert!(int.is_integer());
/// assert!(float.is_float());
/// assert_ne!(int, float);
/// ```
#[derive(Clone, Debug)]
pub enum Number {
    /// Non-negative integer.
    PosInt(u64),
    /// Negative integer.
    NegInt(i64),
    /// Integer that fits in neither `u64` nor `i64`, as its JSON literal.
    BigInt(String),
    /// Floating-point number, always finite when parsed.
    Float(f64),
}

impl Number {
    /// Returns `true` for every integer variant.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::PosInt(_) | Self::NegInt(_) | Self::BigInt(_))
    }

    /// Returns `true` for floating-point numbers.
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }
}

/// Floats compare by bit pattern so that `0.0` and `-0.0` differ, exactly as
/// their printed text does.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PosInt(a), Self::PosInt(b)) => a == b,
            (Self::NegInt(a), Self::NegInt(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl TryFrom<&JsonNumber> for Number {
    type Error = LoadError;

    /// Classifies a parsed number by its literal text: anything with a
    /// fraction or exponent is a float, everything else an integer.
    fn try_from(num: &JsonNumber) -> Result<Self, Self::Error> {
        if let Some(n) = num.as_u64() {
            return Ok(Self::PosInt(n));
        }
        if let Some(n) = num.as_i64() {
            return Ok(Self::from(n));
        }

        let text = num.to_string();
        if text.contains(['.', 'e', 'E']) {
            match text.parse::<f64>() {
                Ok(float) if float.is_finite() => Ok(Self::Float(float)),
                _ => Err(LoadError::NumberOutOfRange(text)),
            }
        } else {
            Ok(Self::BigInt(text))
        }
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::PosInt(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        match u64::try_from(value) {
            Ok(n) => Self::PosInt(n),
            Err(_) => Self::NegInt(value),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Writes the same text a compact JSON encoder would (`1`, `-3`, `1.0`, `2.5e-8`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PosInt(n) => fmt::Display::fmt(n, f),
            Self::NegInt(n) => fmt::Display::fmt(n, f),
            Self::BigInt(text) => f.write_str(text),
            Self::Float(float) => match JsonNumber::from_f64(*float) {
                Some(n) => fmt::Display::fmt(&n, f),
                None => f.write_str("null"),
            },
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::PosInt(n) => serializer.serialize_u64(*n),
            Self::NegInt(n) => serializer.serialize_i64(*n),
            Self::BigInt(text) => {
                text.parse::<JsonNumber>().map_err(S::Error::custom)?.serialize(serializer)
            }
            Self::Float(f) => serializer.serialize_f64(*f),
        }
    }
}
