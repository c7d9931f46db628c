//! [`Document`]: owner of one root [`Value`].

use crate::decoder::{parse_stream, ParseOptions};
use crate::encoder::{emit_with, encode_with, EmitOptions};
use crate::error::Result;
use crate::stream::{CharStream, ReaderStream, SliceStream};
use crate::types::Value;
use std::fmt;
use std::io::{Read, Write};

/// A parsed document.
///
/// The root is whatever the last parse produced: an `Array`, an `Object`, or
/// `Empty` when the input held no `[` or `{`. It can also be replaced
/// wholesale with [`set`](Document::set) or [`replace`](Document::replace).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete in-memory input.
    pub fn from_slice(input: impl AsRef<[u8]>) -> Self {
        let mut doc = Self::new();
        doc.parse(&mut SliceStream::new(input.as_ref()));
        doc
    }

    /// Parse from a reader, one byte per `read` call.
    ///
    /// Malformed input still yields a document; only an I/O failure of the
    /// reader is reported as an error. In that case whatever was parsed
    /// before the failure is discarded. To keep the partial document, parse
    /// a [`ReaderStream`] with [`parse`](Document::parse) and check
    /// [`ReaderStream::take_error`] afterwards.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut stream = ReaderStream::new(reader);
        let mut doc = Self::new();
        doc.parse(&mut stream);
        match stream.take_error() {
            Some(err) => Err(err.into()),
            None => Ok(doc),
        }
    }

    /// Replace the root with the next document in `stream`.
    ///
    /// A stream that is already not good leaves the document untouched.
    pub fn parse<S: CharStream + ?Sized>(&mut self, stream: &mut S) {
        self.parse_with(stream, &ParseOptions::default());
    }

    pub fn parse_with<S: CharStream + ?Sized>(
        &mut self,
        stream: &mut S,
        options: &ParseOptions,
    ) {
        if let Some(root) = parse_stream(stream, options) {
            self.root = root;
        }
    }

    pub fn emit<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        self.emit_with(sink, &EmitOptions::default())
    }

    pub fn emit_with<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        options: &EmitOptions,
    ) -> Result<()> {
        emit_with(&self.root, sink, options)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode_with(&self.root, &EmitOptions::default())
    }

    /// The encoded document as a `String`, failing if any string value or
    /// key is not UTF-8. [`Display`](fmt::Display) is the lossy alternative.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(String::from_utf8(self.to_bytes())?)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    pub fn set(&mut self, value: impl Into<Value>) {
        self.root = value.into();
    }

    /// Install a new root, returning the old one.
    pub fn replace(&mut self, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut self.root, value.into())
    }

    /// Clear the root to `Empty`, whatever it held.
    pub fn reset(&mut self) {
        self.root = Value::Empty;
    }

    /// True iff the root is `Empty`.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn is_null(&self) -> bool {
        self.root.is_null()
    }

    pub fn is_bool(&self) -> bool {
        self.root.is_bool()
    }

    pub fn is_number(&self) -> bool {
        self.root.is_number()
    }

    pub fn is_string(&self) -> bool {
        self.root.is_string()
    }

    pub fn is_array(&self) -> bool {
        self.root.is_array()
    }

    pub fn is_object(&self) -> bool {
        self.root.is_object()
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
