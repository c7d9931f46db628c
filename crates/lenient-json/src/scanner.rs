//! The token reader: the only way the decoder moves over structural bytes.

use crate::stream::CharStream;

/// Skip forward until a byte from `charset` is consumed.
///
/// Whitespace and every byte outside `charset` are discarded, which makes
/// this both the separator matcher and the garbage skipper. Returns the
/// matching byte, or `None` once the stream stops being good. `charset` must
/// not be empty; an empty set drains the stream.
pub fn scan_until<S: CharStream + ?Sized>(stream: &mut S, charset: &[u8]) -> Option<u8> {
    debug_assert!(!charset.is_empty(), "scan_until needs a non-empty charset");
    while let Some(b) = stream.next_byte() {
        if charset.contains(&b) {
            return Some(b);
        }
    }
    None
}
