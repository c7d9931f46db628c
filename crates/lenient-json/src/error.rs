//! Error types for the emitting side of the codec.
//!
//! Parsing never fails: malformed input degrades to `Value::Empty` in place
//! (see [`crate::decoder`]). The only fallible operations are the ones that
//! talk to a byte sink or need the output as UTF-8.

use thiserror::Error;

/// Errors surfaced by emitting and conversion helpers.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The sink (or an `io::Read` source, when surfaced by the caller) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Emitted bytes were requested as a `String` but a string value or key
    /// held bytes that are not valid UTF-8.
    #[error("emitted document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Convenience alias used throughout lenient-json.
pub type Result<T> = std::result::Result<T, JsonError>;
