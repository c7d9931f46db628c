/// Document-level behavior: the six reference inputs, predicates, reset,
/// replacement and the stream / reader entry points.
use lenient_json::{CharStream, Document, ReaderStream, SliceStream, Value};
use std::io::{self, Read};

fn member<'a>(doc: &'a Document, key: &str) -> Option<&'a Value> {
    doc.root().as_object()?.get(key.as_bytes())
}

// ============================================================================
// Reference inputs
// ============================================================================

#[test]
fn empty_object_document() {
    let doc = Document::from_slice("{}");
    assert!(doc.is_object());
    assert_eq!(doc.root().as_object().map(|m| m.len()), Some(0));
    assert_eq!(doc.to_bytes(), b"{}");
}

#[test]
fn flat_object_document() {
    let doc = Document::from_slice(r#"{"a":1,"b":true,"c":"hi"}"#);
    assert_eq!(member(&doc, "a"), Some(&Value::Int(1)));
    assert_eq!(member(&doc, "b"), Some(&Value::Bool(true)));
    assert_eq!(member(&doc, "c"), Some(&Value::from("hi")));

    let again = Document::from_slice(doc.to_bytes());
    assert_eq!(again, doc);
}

#[test]
fn nested_document() {
    let doc = Document::from_slice(r#"{"xs":[1,2.5,false]}"#);
    assert_eq!(
        member(&doc, "xs"),
        Some(&Value::Array(vec![
            Value::Int(1),
            Value::Double(2.5),
            Value::Bool(false)
        ]))
    );
}

#[test]
fn garbage_prefix_document() {
    let doc = Document::from_slice("garbage???   [1,2,3]");
    assert!(doc.is_array());
    assert_eq!(
        doc.root(),
        &Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn truncated_document() {
    let doc = Document::from_slice(r#"{"a":1,"b":"#);
    assert!(doc.is_object());
    assert_eq!(member(&doc, "a"), Some(&Value::Int(1)));
    assert_eq!(member(&doc, "b"), None);
}

#[test]
fn escaped_quote_document() {
    let doc = Document::from_slice(r#"{"k":"he said \"hi\""}"#);
    assert_eq!(member(&doc, "k"), Some(&Value::from(r#"he said "hi""#)));
}

// ============================================================================
// Predicates, reset, replacement
// ============================================================================

#[test]
fn new_document_is_empty() {
    let doc = Document::new();
    assert!(doc.is_empty());
    assert!(!doc.is_object());
    assert!(!doc.is_array());
    assert!(!doc.is_null());
}

#[test]
fn document_without_container_is_empty() {
    for input in ["", "42", "true", "\"s\"", "no brackets at all", "null"] {
        assert!(Document::from_slice(input).is_empty(), "input: {input:?}");
    }
}

#[test]
fn reset_always_clears() {
    let mut doc = Document::from_slice("[1]");
    assert!(!doc.is_empty());
    doc.reset();
    assert!(doc.is_empty());
    doc.reset();
    assert!(doc.is_empty());
}

#[test]
fn predicates_follow_root_variant() {
    let mut doc = Document::new();
    doc.set(3.5);
    assert!(doc.is_number());
    doc.set(7);
    assert!(doc.is_number());
    doc.set("text");
    assert!(doc.is_string());
    doc.set(true);
    assert!(doc.is_bool());
    doc.set(Value::Null);
    assert!(doc.is_null());
    assert!(!doc.is_empty());
}

#[test]
fn replace_returns_previous_root() {
    let mut doc = Document::from_slice("[1]");
    let old = doc.replace(Value::Array(vec![]));
    assert_eq!(old, Value::Array(vec![Value::Int(1)]));
    assert_eq!(doc.to_bytes(), b"[]");
    assert_eq!(doc.into_root(), Value::Array(vec![]));
}

#[test]
fn documents_are_independent_copies() {
    let original = Document::from_slice(r#"{"a":[1]}"#);
    let mut copy = original.clone();
    copy.reset();
    assert!(original.is_object());
    assert!(copy.is_empty());
}

// ============================================================================
// Streams
// ============================================================================

#[test]
fn parse_replaces_previous_root() {
    let mut doc = Document::from_slice("[1]");
    doc.parse(&mut SliceStream::from("nothing here"));
    assert!(doc.is_empty());
}

#[test]
fn parse_on_failed_stream_keeps_document() {
    let mut doc = Document::from_slice("[1]");
    let mut stream = SliceStream::from("{}");
    stream.fail();
    doc.parse(&mut stream);
    assert_eq!(doc.root(), &Value::Array(vec![Value::Int(1)]));
}

#[test]
fn consecutive_documents_from_one_stream() {
    let mut stream = SliceStream::from(r#"{"n":1} {"n":2}"#);
    let mut doc = Document::new();
    doc.parse(&mut stream);
    assert_eq!(member(&doc, "n"), Some(&Value::Int(1)));
    doc.parse(&mut stream);
    assert_eq!(member(&doc, "n"), Some(&Value::Int(2)));
    doc.parse(&mut stream);
    assert!(doc.is_empty());
}

#[test]
fn from_reader_matches_from_slice() {
    let input = r#"prefix {"a":[1,2.5,"x"],"b":{"c":null}}"#;
    let from_reader = Document::from_reader(input.as_bytes()).unwrap();
    assert_eq!(from_reader, Document::from_slice(input));
}

#[test]
fn reader_stream_number_at_end() {
    let mut stream = ReaderStream::new(&b"[12"[..]);
    let mut doc = Document::new();
    doc.parse(&mut stream);
    assert_eq!(doc.root(), &Value::Array(vec![Value::Int(12)]));
}

/// Yields a few bytes, then fails.
struct FlakyReader {
    data: &'static [u8],
}

impl Read for FlakyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.split_first() {
            Some((&b, rest)) if !buf.is_empty() => {
                buf[0] = b;
                self.data = rest;
                Ok(1)
            }
            _ => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        }
    }
}

#[test]
fn from_reader_surfaces_io_error() {
    let reader = FlakyReader { data: b"[1,2" };
    let err = Document::from_reader(reader).unwrap_err();
    assert!(err.to_string().contains("reset"), "got: {err}");
}

#[test]
fn reader_stream_keeps_members_read_before_io_error() {
    let mut stream = ReaderStream::new(FlakyReader {
        data: br#"{"a":[1,2],"b":"#,
    });
    let mut doc = Document::new();
    doc.parse(&mut stream);
    assert_eq!(
        member(&doc, "a"),
        Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
    );
    assert_eq!(member(&doc, "b"), None);
    let err = stream.take_error().map(|e| e.kind());
    assert_eq!(err, Some(io::ErrorKind::ConnectionReset));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn emit_and_display_agree_for_utf8() {
    let doc = Document::from_slice(r#"{"k":["v",1]}"#);
    let mut sink = Vec::new();
    doc.emit(&mut sink).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), doc.to_string());
    assert_eq!(doc.to_json_string().unwrap(), r#"{"k":["v",1]}"#);
}

#[test]
fn to_json_string_rejects_invalid_utf8() {
    let doc = Document::from(Value::Array(vec![Value::String(vec![0xc3])]));
    assert!(doc.to_json_string().is_err());
    assert_eq!(doc.to_string(), "[\"\u{fffd}\"]");
}

#[test]
fn empty_document_emits_nothing() {
    assert_eq!(Document::new().to_bytes(), b"");
}
