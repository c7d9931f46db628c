//! # lenient-json
//!
//! A permissive streaming JSON codec. The decoder reads a byte stream one
//! byte at a time into a tagged [`Value`] tree; the encoder writes the tree
//! back out in a compact form the decoder accepts.
//!
//! The dialect is forgiving rather than strict: leading garbage is skipped,
//! unrecognized tokens become [`Value::Empty`], and a truncated stream keeps
//! whatever was complete. Parsing never returns an error.
//!
//! ## Quick start
//!
//! ```rust
//! use lenient_json::{Document, Value};
//!
//! let doc = Document::from_slice(r#"log line: {"name":"Alice","scores":[95,87.5]}"#);
//! assert!(doc.is_object());
//!
//! let members = doc.root().as_object().unwrap();
//! assert_eq!(members[b"name".as_slice()], Value::from("Alice"));
//! assert_eq!(doc.to_json_string().unwrap(), r#"{"name":"Alice","scores":[95,87.5]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — byte stream → `Value` (recursive descent, options)
//! - [`encoder`] — `Value` → bytes
//! - [`document`] — `Document`, the owner of one root value
//! - [`scanner`] — the whitespace- and garbage-skipping token reader
//! - [`stream`] — `CharStream` and the slice / `io::Read` adapters
//! - [`types`] — the `Value` model
//! - [`error`] — error type for the fallible (output) side
//! - [`convert`] — serde and `serde_json` interop

pub mod convert;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod scanner;
pub mod stream;
pub mod types;

pub use decoder::{decode, decode_with, parse_stream, EscapeMode, ParseOptions};
pub use document::Document;
pub use encoder::{emit, emit_with, encode, encode_with, EmitOptions};
pub use error::{JsonError, Result};
pub use scanner::scan_until;
pub use stream::{CharStream, ReaderStream, SliceStream};
pub use types::{Array, Object, Value};
