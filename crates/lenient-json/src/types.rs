//! The tagged value tree produced by the decoder and walked by the encoder.
//!
//! Strings and object keys are raw byte sequences: the parser copies bytes
//! between quotes without validating UTF-8, and the encoder writes them back
//! out unchanged. Objects are `BTreeMap`s, so enumeration order is bytewise
//! sorted rather than insertion order.

use std::collections::BTreeMap;
use std::fmt;

/// Ordered sequence of values. Duplicates and `Empty` members are allowed.
pub type Array = Vec<Value>;

/// Mapping from byte-string keys to values. A later duplicate key replaces
/// the earlier one.
pub type Object = BTreeMap<Vec<u8>, Value>;

/// A parsed JSON value.
///
/// `Empty` is the "no value" state: the default, and what the decoder yields
/// for anything it does not recognize. It is distinct from `Null`, which is
/// the literal `null`, and from empty containers.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Empty,
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(Vec<u8>),
    Array(Array),
    Object(Object),
}

impl Value {
    /// Classify a number read as `f64`.
    ///
    /// The result is `Int` when `n` equals its own truncation and lies inside
    /// the `i64` range, `Double` otherwise (fractions, NaN, infinities and
    /// magnitudes of 2^63 and above).
    pub fn number(n: f64) -> Value {
        // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
        if n.trunc() == n && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Value::Int(n as i64)
        } else {
            Value::Double(n)
        }
    }

    /// Build a `String` value from anything byte-like.
    pub fn string(bytes: impl Into<Vec<u8>>) -> Value {
        Value::String(bytes.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// True for both `Int` and `Double`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Raw bytes of a `String` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into_bytes())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::String(bytes)
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(members: Object) -> Self {
        Value::Object(members)
    }
}

/// Renders the encoder's output, replacing invalid UTF-8 with U+FFFD.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = crate::encoder::encode(self);
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}
