//! Encoder — writes a [`Value`] tree back out as text.
//!
//! The output is compact (no whitespace) and is read back by the decoder:
//!
//! - `Empty` writes nothing, `Null` writes `null`
//! - `Int` uses the shortest decimal form, `Double` the shortest form that
//!   round-trips (`f64`'s `Display`); NaN and infinities, which the decoder
//!   never produces, write `null`
//! - Strings and keys are written byte for byte between quotes; escapes are
//!   only re-inserted with [`EmitOptions::escape_strings`]
//! - Separators go between elements, never after the last one
//!
//! Object members come out in the object's key order, which for the
//! `BTreeMap` backing store is bytewise sorted.
//!
//! # Example
//! ```
//! use lenient_json::{decode, encode};
//! let value = decode(r#"{"b": [1, 2.5], "a": true}"#);
//! assert_eq!(encode(&value), br#"{"a":true,"b":[1,2.5]}"#);
//! ```

use crate::error::Result;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Escape `"`, `\` and control bytes inside strings and keys. Off by
    /// default, matching the decoder's verbatim escape handling; turn it on
    /// together with `EscapeMode::Standard` for a lossless round trip of
    /// arbitrary strings.
    pub escape_strings: bool,
}

/// Encode a value into a fresh buffer with default options.
pub fn encode(value: &Value) -> Vec<u8> {
    encode_with(value, &EmitOptions::default())
}

/// Encode a value into a fresh buffer.
pub fn encode_with(value: &Value, options: &EmitOptions) -> Vec<u8> {
    let mut out = Vec::new();
    encode_value(value, options, &mut out);
    out
}

/// Write a value to `sink` with default options.
pub fn emit<W: Write + ?Sized>(value: &Value, sink: &mut W) -> Result<()> {
    emit_with(value, sink, &EmitOptions::default())
}

/// Write a value to `sink`. Only a failing sink makes this return an error.
pub fn emit_with<W: Write + ?Sized>(
    value: &Value,
    sink: &mut W,
    options: &EmitOptions,
) -> Result<()> {
    sink.write_all(&encode_with(value, options))?;
    Ok(())
}

/// Recursive dispatch on the variant.
fn encode_value(value: &Value, options: &EmitOptions, out: &mut Vec<u8>) {
    match value {
        Value::Empty => {}
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Int(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::Double(f) if f.is_finite() => out.extend_from_slice(f.to_string().as_bytes()),
        Value::Double(_) => out.extend_from_slice(b"null"),
        Value::String(bytes) => encode_string(bytes, options, out),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                encode_value(item, options, out);
            }
            out.push(b']');
        }
        Value::Object(members) => {
            out.push(b'{');
            for (i, (key, member)) in members.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                encode_string(key, options, out);
                out.push(b':');
                encode_value(member, options, out);
            }
            out.push(b'}');
        }
    }
}

fn encode_string(bytes: &[u8], options: &EmitOptions, out: &mut Vec<u8>) {
    out.push(b'"');
    if options.escape_strings {
        for &b in bytes {
            match b {
                b'"' => out.extend_from_slice(b"\\\""),
                b'\\' => out.extend_from_slice(b"\\\\"),
                b'\n' => out.extend_from_slice(b"\\n"),
                b'\r' => out.extend_from_slice(b"\\r"),
                b'\t' => out.extend_from_slice(b"\\t"),
                0x08 => out.extend_from_slice(b"\\b"),
                0x0c => out.extend_from_slice(b"\\f"),
                0x00..=0x1f => out.extend_from_slice(format!("\\u{:04x}", b).as_bytes()),
                _ => out.push(b),
            }
        }
    } else {
        out.extend_from_slice(bytes);
    }
    out.push(b'"');
}
