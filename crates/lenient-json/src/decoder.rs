//! Decoder — parses a byte stream into a [`Value`] tree.
//!
//! The decoder is a recursive descent over a [`CharStream`], one byte at a
//! time. It never reports an error: anything it does not recognize becomes
//! `Value::Empty` at that position and parsing carries on.
//!
//! - Bytes before the first `[` or `{` are discarded; with neither present the
//!   result is `Empty`
//! - Strings keep whitespace; `\X` handling depends on [`EscapeMode`]
//! - `true`, `false`, `null` are recognized; numbers start with a digit or `-`
//! - Inside objects, members whose value is `Empty` are dropped; inside arrays
//!   `Empty` is kept so positions are preserved
//! - If the stream ends early, every open container keeps what it has
//!
//! # Key design decisions
//!
//! - **Structural bytes at value position are pushed back**: a `,`, `]` or `}`
//!   where a value should start yields `Empty` without consuming the byte, so
//!   `[1,]` and `{"a":}` still close where they should.
//! - **Object keys scan for `"` or `}`**: an object with no (further) members
//!   must stop at its own closing brace instead of running on into the next
//!   quote of its parent.
//! - **Depth limit**: nesting beyond [`ParseOptions::max_depth`] fails the
//!   stream so the whole parse unwinds, keeping recursion bounded.

use crate::scanner::scan_until;
use crate::stream::{CharStream, SliceStream};
use crate::types::{Object, Value};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// What to do with the byte after a backslash inside a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Drop the backslash and keep the next byte as is, so `\"` is `"` and
    /// `\n` is a plain `n`.
    #[default]
    Verbatim,
    /// Translate the JSON escapes `\n \t \r \b \f \/ \\ \"` and `\uXXXX`
    /// (including surrogate pairs) to their UTF-8 bytes. Malformed `\u`
    /// escapes become U+FFFD. Any other escaped byte is kept as is.
    Standard,
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub escapes: EscapeMode,
    /// Deepest container nesting accepted, the root container counting as 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            escapes: EscapeMode::Verbatim,
            max_depth: 128,
        }
    }
}

/// Decode a complete in-memory input with default options.
///
/// Never fails: malformed or unwrapped input gives `Value::Empty` or a
/// partially filled container.
pub fn decode(input: impl AsRef<[u8]>) -> Value {
    decode_with(input, &ParseOptions::default())
}

/// Decode a complete in-memory input.
pub fn decode_with(input: impl AsRef<[u8]>, options: &ParseOptions) -> Value {
    let mut stream = SliceStream::new(input.as_ref());
    parse_stream(&mut stream, options).unwrap_or_default()
}

/// Parse one document from `stream`.
///
/// Returns `None` without reading anything when the stream is already not
/// good; otherwise the root value, which is `Empty` when no `[` or `{` was
/// found. The stream is left just past the root's closing byte.
pub fn parse_stream<S: CharStream + ?Sized>(
    stream: &mut S,
    options: &ParseOptions,
) -> Option<Value> {
    if !stream.is_good() {
        return None;
    }
    let mut parser = Parser {
        stream,
        options: *options,
        depth: 0,
    };
    Some(parser.parse_root())
}

struct Parser<'s, S: ?Sized> {
    stream: &'s mut S,
    options: ParseOptions,
    depth: usize,
}

impl<S: CharStream + ?Sized> Parser<'_, S> {
    fn parse_root(&mut self) -> Value {
        let root = match scan_until(self.stream, b"[{") {
            Some(b'[') => self.nested(Self::parse_array),
            Some(_) => self.nested(Self::parse_object),
            None => {
                debug!("no `[` or `{{` in input; document left empty");
                return Value::Empty;
            }
        };
        trace!("parsed {} root", root.kind());
        root
    }

    /// Run a container body one level deeper, or give up on the input if
    /// that would exceed `max_depth`.
    fn nested(&mut self, body: fn(&mut Self) -> Value) -> Value {
        if self.depth >= self.options.max_depth {
            debug!(
                "nesting exceeds {} levels; abandoning input",
                self.options.max_depth
            );
            self.stream.fail();
            return Value::Empty;
        }
        self.depth += 1;
        let value = body(self);
        self.depth -= 1;
        value
    }

    fn parse_value(&mut self) -> Value {
        let Some(lead) = self.stream.next_byte() else {
            return Value::Empty;
        };
        match lead {
            b'"' => Value::String(self.parse_string()),
            b'{' => self.nested(Self::parse_object),
            b'[' => self.nested(Self::parse_array),
            b't' => self.parse_literal(b"rue", Value::Bool(true)),
            b'f' => self.parse_literal(b"alse", Value::Bool(false)),
            b'n' => self.parse_literal(b"ull", Value::Null),
            b'0'..=b'9' | b'-' => self.parse_number(),
            b',' | b']' | b'}' => {
                self.stream.unread();
                Value::Empty
            }
            other => {
                trace!("unrecognized byte {:?} at value position", other as char);
                Value::Empty
            }
        }
    }

    /// Match the rest of a bare word. On a mismatch the offending byte is
    /// pushed back so a following separator is not lost.
    fn parse_literal(&mut self, rest: &[u8], value: Value) -> Value {
        for &expected in rest {
            match self.stream.read_byte() {
                Some(b) if b == expected => {}
                Some(_) => {
                    self.stream.unread();
                    return Value::Empty;
                }
                None => return Value::Empty,
            }
        }
        value
    }

    fn parse_number(&mut self) -> Value {
        self.stream.unread();
        match self.stream.read_number() {
            Some(n) => Value::number(n),
            None => Value::Empty,
        }
    }

    /// Read a string body; the opening quote is already consumed.
    fn parse_string(&mut self) -> Vec<u8> {
        let mut buf = Vec::new();
        loop {
            let Some(b) = self.stream.read_byte() else {
                trace!("unterminated string after {} bytes", buf.len());
                break;
            };
            match b {
                b'"' => break,
                b'\\' => match self.stream.read_byte() {
                    Some(escaped) => self.push_escape(escaped, &mut buf),
                    None => break,
                },
                _ => buf.push(b),
            }
        }
        buf
    }

    fn push_escape(&mut self, escaped: u8, buf: &mut Vec<u8>) {
        if self.options.escapes == EscapeMode::Verbatim {
            buf.push(escaped);
            return;
        }
        match escaped {
            b'n' => buf.push(b'\n'),
            b't' => buf.push(b'\t'),
            b'r' => buf.push(b'\r'),
            b'b' => buf.push(0x08),
            b'f' => buf.push(0x0c),
            b'u' => self.push_unicode_escape(buf),
            other => buf.push(other),
        }
    }

    /// Decode the `XXXX` of a `\uXXXX` escape, pairing a high surrogate with
    /// the low surrogate escape that must follow it. An unpaired high
    /// surrogate becomes U+FFFD and the escape after it is decoded afresh.
    fn push_unicode_escape(&mut self, buf: &mut Vec<u8>) {
        let Some(mut unit) = self.read_hex4() else {
            return push_char(buf, char::REPLACEMENT_CHARACTER);
        };
        while (0xD800..0xDC00).contains(&unit) {
            match self.stream.read_byte() {
                Some(b'\\') => {}
                Some(_) => {
                    self.stream.unread();
                    return push_char(buf, char::REPLACEMENT_CHARACTER);
                }
                None => return push_char(buf, char::REPLACEMENT_CHARACTER),
            }
            match self.stream.read_byte() {
                Some(b'u') => {}
                Some(other) => {
                    push_char(buf, char::REPLACEMENT_CHARACTER);
                    return self.push_escape(other, buf);
                }
                None => return push_char(buf, char::REPLACEMENT_CHARACTER),
            }
            match self.read_hex4() {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let code =
                        0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                    return push_char(buf, ch);
                }
                Some(next) => {
                    push_char(buf, char::REPLACEMENT_CHARACTER);
                    unit = next;
                }
                None => return push_char(buf, char::REPLACEMENT_CHARACTER),
            }
        }
        let ch = char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER);
        push_char(buf, ch);
    }

    fn read_hex4(&mut self) -> Option<u16> {
        let mut unit = 0u16;
        for _ in 0..4 {
            let b = self.stream.read_byte()?;
            match char::from(b).to_digit(16) {
                Some(digit) => unit = (unit << 4) | digit as u16,
                None => {
                    self.stream.unread();
                    return None;
                }
            }
        }
        Some(unit)
    }

    /// Parse array members; the `[` is already consumed.
    fn parse_array(&mut self) -> Value {
        let mut items = Vec::new();
        // A closing bracket right away is a genuine empty array, not one
        // holding a single Empty.
        match self.stream.next_byte() {
            Some(b']') | None => return Value::Array(items),
            Some(_) => self.stream.unread(),
        }
        loop {
            items.push(self.parse_value());
            match scan_until(self.stream, b",]") {
                Some(b',') => continue,
                Some(_) => break,
                None => {
                    trace!("array ended early after {} items", items.len());
                    break;
                }
            }
        }
        Value::Array(items)
    }

    /// Parse object members; the `{` is already consumed.
    fn parse_object(&mut self) -> Value {
        let mut members = Object::new();
        loop {
            if scan_until(self.stream, b"\"}") != Some(b'"') {
                break;
            }
            let key = self.parse_string();
            if scan_until(self.stream, b":").is_none() {
                trace!(
                    "object ended before the value of {:?}",
                    String::from_utf8_lossy(&key)
                );
                break;
            }
            let value = self.parse_value();
            if value.is_empty() {
                trace!(
                    "dropping member {:?} with no value",
                    String::from_utf8_lossy(&key)
                );
            } else {
                members.insert(key, value);
            }
            if scan_until(self.stream, b",}") != Some(b',') {
                break;
            }
        }
        Value::Object(members)
    }
}

fn push_char(buf: &mut Vec<u8>, ch: char) {
    let mut utf8 = [0u8; 4];
    buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
}
