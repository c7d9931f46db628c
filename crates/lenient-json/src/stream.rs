//! Byte sources the decoder can pull from.
//!
//! The decoder never buffers: it asks for one byte at a time, steps back at
//! most one byte, and reads number literals through [`CharStream::read_number`].
//! Once a stream stops being good every read returns `None`, which is how all
//! parse loops terminate.

use log::debug;
use std::io::{self, Read};

/// Capabilities the decoder needs from its input.
pub trait CharStream {
    /// Read the next raw byte. Returns `None` and leaves the stream not-good
    /// once the input is exhausted or has failed.
    fn read_byte(&mut self) -> Option<u8>;

    /// Whether the last operation left the stream readable.
    fn is_good(&self) -> bool;

    /// Step back over the byte returned by the last successful `read_byte`.
    fn unread(&mut self);

    /// Put the stream into the not-good state.
    fn fail(&mut self);

    /// Read the next byte that is not JSON whitespace.
    fn next_byte(&mut self) -> Option<u8> {
        loop {
            match self.read_byte()? {
                b' ' | b'\t' | b'\n' | b'\r' => continue,
                b => return Some(b),
            }
        }
    }

    /// Read a float literal after skipping whitespace.
    ///
    /// Consumes the longest run matching `[+-]?digits[.digits][(e|E)[+-]digits]`
    /// and parses it with `f64::from_str`. If the run does not parse (`-`,
    /// `1e`, ...) or overflows to infinity (`1e400`) the stream is failed and
    /// `None` is returned.
    fn read_number(&mut self) -> Option<f64> {
        let first = self.next_byte()?;
        if !matches!(first, b'0'..=b'9' | b'-' | b'+' | b'.') {
            self.unread();
            self.fail();
            return None;
        }

        let mut literal = vec![first];
        let mut seen_dot = first == b'.';
        let mut seen_exp = false;
        let mut prev = first;
        while let Some(b) = self.read_byte() {
            let accept = match b {
                b'0'..=b'9' => true,
                b'.' if !seen_dot && !seen_exp => {
                    seen_dot = true;
                    true
                }
                b'e' | b'E' if !seen_exp => {
                    seen_exp = true;
                    true
                }
                b'+' | b'-' => matches!(prev, b'e' | b'E'),
                _ => false,
            };
            if !accept {
                self.unread();
                break;
            }
            literal.push(b);
            prev = b;
        }

        let parsed = std::str::from_utf8(&literal)
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|n| n.is_finite());
        if parsed.is_none() {
            debug!(
                "malformed or out of range number literal {:?}",
                String::from_utf8_lossy(&literal)
            );
            self.fail();
        }
        parsed
    }
}

impl<S: CharStream + ?Sized> CharStream for &mut S {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn is_good(&self) -> bool {
        (**self).is_good()
    }

    fn unread(&mut self) {
        (**self).unread()
    }

    fn fail(&mut self) {
        (**self).fail()
    }

    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }

    fn read_number(&mut self) -> Option<f64> {
        (**self).read_number()
    }
}

/// An in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceStream<'a> {
    bytes: &'a [u8],
    pos: usize,
    good: bool,
}

impl<'a> SliceStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            good: true,
        }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos.min(self.bytes.len())..]
    }
}

impl<'a> From<&'a str> for SliceStream<'a> {
    fn from(s: &'a str) -> Self {
        SliceStream::new(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for SliceStream<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SliceStream::new(bytes)
    }
}

impl CharStream for SliceStream<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        if !self.good {
            return None;
        }
        match self.bytes.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Some(b)
            }
            None => {
                self.good = false;
                None
            }
        }
    }

    fn is_good(&self) -> bool {
        self.good
    }

    fn unread(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    fn fail(&mut self) {
        self.good = false;
    }
}

/// Pulls bytes one at a time from any [`io::Read`].
///
/// Each byte is a separate `read` call, so wrap unbuffered sources such as
/// files or sockets in a [`std::io::BufReader`]. A read error other than
/// `Interrupted` ends the stream; the error is kept for [`take_error`].
///
/// [`take_error`]: ReaderStream::take_error
#[derive(Debug)]
pub struct ReaderStream<R> {
    inner: R,
    last: Option<u8>,
    pushback: Option<u8>,
    good: bool,
    error: Option<io::Error>,
}

impl<R: Read> ReaderStream<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            last: None,
            pushback: None,
            good: true,
            error: None,
        }
    }

    /// The I/O error that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> CharStream for ReaderStream<R> {
    fn read_byte(&mut self) -> Option<u8> {
        if !self.good {
            return None;
        }
        if let Some(b) = self.pushback.take() {
            self.last = Some(b);
            return Some(b);
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => {
                    self.good = false;
                    self.last = None;
                    return None;
                }
                Ok(_) => {
                    self.last = Some(buf[0]);
                    return Some(buf[0]);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    debug!("read failed, ending stream: {err}");
                    self.error = Some(err);
                    self.good = false;
                    self.last = None;
                    return None;
                }
            }
        }
    }

    fn is_good(&self) -> bool {
        self.good
    }

    fn unread(&mut self) {
        if let Some(b) = self.last.take() {
            self.pushback = Some(b);
        }
    }

    fn fail(&mut self) {
        self.good = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn slice_goes_bad_at_end() {
        let mut s = SliceStream::from("ab");
        assert_eq!(s.read_byte(), Some(b'a'));
        assert_eq!(s.read_byte(), Some(b'b'));
        assert!(s.is_good());
        assert_eq!(s.read_byte(), None);
        assert!(!s.is_good());
        assert_eq!(s.read_byte(), None);
    }

    #[test]
    fn next_byte_skips_json_whitespace_only() {
        let mut s = SliceStream::from(" \t\r\n x\x0b");
        assert_eq!(s.next_byte(), Some(b'x'));
        assert_eq!(s.next_byte(), Some(0x0b));
    }

    #[test]
    fn unread_replays_last_byte() {
        let mut s = SliceStream::from("12");
        assert_eq!(s.read_byte(), Some(b'1'));
        s.unread();
        assert_eq!(s.position(), 0);
        assert_eq!(s.read_byte(), Some(b'1'));
    }

    #[test]
    fn read_number_stops_at_delimiter() {
        let mut s = SliceStream::from("  -12.5e1,");
        assert_eq!(s.read_number(), Some(-125.0));
        assert!(s.is_good());
        assert_eq!(s.remaining(), b",");
    }

    #[test]
    fn read_number_at_end_of_input() {
        let mut s = SliceStream::from("42");
        assert_eq!(s.read_number(), Some(42.0));
        assert!(!s.is_good());
    }

    #[test]
    fn read_number_rejects_bare_sign() {
        let mut s = SliceStream::from("-]");
        assert_eq!(s.read_number(), None);
        assert!(!s.is_good());
    }

    #[test]
    fn read_number_rejects_dangling_exponent() {
        let mut s = SliceStream::from("1e]");
        assert_eq!(s.read_number(), None);
        assert!(!s.is_good());
    }

    #[test]
    fn read_number_rejects_overflow() {
        let mut s = SliceStream::from("-1e400,2");
        assert_eq!(s.read_number(), None);
        assert!(!s.is_good());
    }

    #[test]
    fn read_number_keeps_large_finite() {
        let mut s = SliceStream::from("1.5e300]");
        assert_eq!(s.read_number(), Some(1.5e300));
        assert!(s.is_good());
    }

    #[test]
    fn second_minus_ends_literal() {
        let mut s = SliceStream::from("1-2");
        assert_eq!(s.read_number(), Some(1.0));
        assert_eq!(s.remaining(), b"-2");
    }

    #[test]
    fn reader_stream_pushback() {
        let mut s = ReaderStream::new(&b"xy"[..]);
        assert_eq!(s.read_byte(), Some(b'x'));
        s.unread();
        assert_eq!(s.read_byte(), Some(b'x'));
        assert_eq!(s.read_byte(), Some(b'y'));
        assert_eq!(s.read_byte(), None);
        assert!(!s.is_good());
        assert!(s.take_error().is_none());
    }

    #[test]
    fn reader_stream_hands_back_reader() {
        let mut s = ReaderStream::new(io::Cursor::new(b"[1] tail".to_vec()));
        assert_eq!(s.next_byte(), Some(b'['));
        let cursor = s.into_inner();
        assert_eq!(cursor.position(), 1);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn reader_stream_keeps_io_error() {
        let mut s = ReaderStream::new(Broken);
        assert_eq!(s.read_byte(), None);
        assert!(!s.is_good());
        let err = s.take_error().map(|e| e.kind());
        assert_eq!(err, Some(io::ErrorKind::BrokenPipe));
    }
}
