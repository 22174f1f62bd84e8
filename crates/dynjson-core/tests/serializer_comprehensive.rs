//! Comprehensive tests for the serializer
//!
//! Covers compact and indented layout, the escaping table with both
//! `escape_non_ascii` settings, numeric formatting, output adapters, and
//! the dump/parse round-trip guarantees.

use dynjson_rs::{DumpOptions, JsonValue, Object};

fn parse(text: &str) -> JsonValue {
    JsonValue::parse(text).expect("expected valid JSON")
}

// ============================================================================
// Compact Layout Tests
// ============================================================================

#[test]
fn test_compact_scalars() {
    assert_eq!(JsonValue::Null.dump(), "null");
    assert_eq!(JsonValue::Bool(true).dump(), "true");
    assert_eq!(JsonValue::Bool(false).dump(), "false");
    assert_eq!(JsonValue::Integer(42).dump(), "42");
    assert_eq!(JsonValue::string("hi").dump(), r#""hi""#);
}

#[test]
fn test_compact_containers() {
    assert_eq!(parse("[1,2,3]").dump(), "[1,2,3]");
    assert_eq!(parse(r#"{"a":1,"b":[true,null]}"#).dump(), r#"{"a":1,"b":[true,null]}"#);
    assert_eq!(JsonValue::array(vec![]).dump(), "[]");
    assert_eq!(JsonValue::object(Object::new()).dump(), "{}");
}

// ============================================================================
// Pretty Layout Tests
// ============================================================================

#[test]
fn test_pretty_object_layout() {
    let value = parse(r#"{"a":1,"b":[1,2],"c":{"d":null},"e":[],"f":{}}"#);
    let expected = "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ],\n  \"c\": {\n    \"d\": null\n  },\n  \"e\": [],\n  \"f\": {}\n}";
    assert_eq!(value.dump_pretty(2), expected);
}

#[test]
fn test_pretty_array_layout() {
    let value = parse(r#"[1,"x"]"#);
    assert_eq!(value.dump_pretty(4), "[\n    1,\n    \"x\"\n]");
}

#[test]
fn test_pretty_zero_indent_still_breaks_lines() {
    let value = parse("[1,2]");
    assert_eq!(value.dump_pretty(0), "[\n1,\n2\n]");
}

#[test]
fn test_pretty_custom_indent_char() {
    let options = DumpOptions {
        indent: Some(1),
        indent_char: '\t',
        ..DumpOptions::default()
    };
    let value = parse(r#"{"a":1}"#);
    assert_eq!(value.dump_with(&options), "{\n\t\"a\": 1\n}");
}

#[test]
fn test_pretty_deep_nesting_grows_indent_buffer() {
    let depth = 40;
    let text = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
    let value = parse(&text);
    let pretty = value.dump_pretty(3);
    // innermost element sits under depth * 3 indent characters
    assert!(pretty.contains(&format!("\n{}1\n", " ".repeat(depth * 3))));
    assert_eq!(parse(&pretty), value);
}

#[test]
fn test_pretty_round_trip_is_indent_invariant() {
    let value = parse(r#"{"a":[1,2.5,"x"],"b":{"c":[[]]},"d":null}"#);
    for indent in [0, 1, 2, 4, 8] {
        assert_eq!(parse(&value.dump_pretty(indent)), value);
    }
}

// ============================================================================
// String Escaping Tests
// ============================================================================

#[test]
fn test_escape_table() {
    let value = JsonValue::string("\"\\\n\r\t\u{8}\u{c}");
    assert_eq!(value.dump(), "\"\\\"\\\\\\n\\r\\t\\b\\f\"");
}

#[test]
fn test_control_characters_always_escape() {
    let value = JsonValue::string("\u{1}\u{1f}");
    assert_eq!(value.dump(), "\"\\u0001\\u001f\"");
    let raw = DumpOptions {
        escape_non_ascii: false,
        ..DumpOptions::default()
    };
    assert_eq!(value.dump_with(&raw), "\"\\u0001\\u001f\"");
}

#[test]
fn test_non_ascii_escaping_toggle() {
    let value = JsonValue::string("né😀");
    assert_eq!(value.dump(), "\"n\\u00e9\\ud83d\\ude00\"");

    let raw = DumpOptions {
        escape_non_ascii: false,
        ..DumpOptions::default()
    };
    assert_eq!(value.dump_with(&raw), "\"né😀\"");
}

#[test]
fn test_escaping_round_trip_both_settings() {
    // tab, quote, and code points at and above 0x7F
    let value = JsonValue::string("a\t\"b\u{7f}é😀");
    for escape_non_ascii in [true, false] {
        let options = DumpOptions {
            escape_non_ascii,
            ..DumpOptions::default()
        };
        let text = value.dump_with(&options);
        assert_eq!(parse(&text), value);
    }
}

#[test]
fn test_object_keys_are_escaped() {
    let mut object = JsonValue::object(Object::new());
    object.insert("a\"b", 1i64).unwrap();
    assert_eq!(object.dump(), "{\"a\\\"b\":1}");
}

// ============================================================================
// Numeric Formatting Tests
// ============================================================================

#[test]
fn test_integer_formatting() {
    assert_eq!(JsonValue::Integer(0).dump(), "0");
    assert_eq!(JsonValue::Integer(7).dump(), "7");
    assert_eq!(JsonValue::Integer(-7).dump(), "-7");
    assert_eq!(JsonValue::Integer(1_000_000).dump(), "1000000");
    assert_eq!(JsonValue::Integer(i64::MAX).dump(), "9223372036854775807");
    assert_eq!(JsonValue::Integer(i64::MIN).dump(), "-9223372036854775808");
}

#[test]
fn test_float_formatting() {
    assert_eq!(JsonValue::Float(3.5).dump(), "3.5");
    assert_eq!(JsonValue::Float(-0.25).dump(), "-0.25");
    assert_eq!(JsonValue::Float(0.0).dump(), "0");
    assert_eq!(JsonValue::Float(1e300).dump(), "1e300");
    assert_eq!(JsonValue::Float(2.5e-9).dump(), "2.5e-9");
}

#[test]
fn test_integral_floats_stay_numerically_equal() {
    let value = JsonValue::Float(1.0);
    let back = parse(&value.dump());
    assert_eq!(back, value);
}

#[test]
fn test_non_finite_floats_dump_as_null() {
    assert_eq!(JsonValue::Float(f64::NAN).dump(), "null");
    assert_eq!(JsonValue::Float(f64::INFINITY).dump(), "null");
    assert_eq!(JsonValue::Float(f64::NEG_INFINITY).dump(), "null");
}

#[test]
fn test_float_round_trip_is_exact() {
    for f in [0.1, 1.5, -2.25e-3, 6.02214076e23, f64::MIN_POSITIVE, f64::MAX] {
        let value = JsonValue::Float(f);
        assert_eq!(parse(&value.dump()), value);
    }
}

// ============================================================================
// Output Adapter Tests
// ============================================================================

#[test]
fn test_dump_to_writer() {
    let value = parse(r#"{"a":[1,2]}"#);
    let mut out = Vec::new();
    value
        .dump_to_writer(&mut out, &DumpOptions::default())
        .unwrap();
    assert_eq!(out, br#"{"a":[1,2]}"#);
}

#[test]
fn test_dump_to_writer_propagates_io_errors() {
    struct FailingWriter;
    impl std::io::Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink is closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let value = parse("[1]");
    let result = value.dump_to_writer(FailingWriter, &DumpOptions::default());
    assert!(matches!(result, Err(dynjson_rs::JsonError::Io(_))));
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn test_compact_round_trip() {
    let documents = [
        "null",
        "true",
        "-17",
        "2.5",
        r#""text with spaces""#,
        "[]",
        "{}",
        r#"[null,true,1,2.5,"x",[1],{"k":"v"}]"#,
        r#"{"a":{"b":{"c":[1,2,3]}}}"#,
    ];
    for text in documents {
        let value = parse(text);
        assert_eq!(value.dump(), text);
        assert_eq!(parse(&value.dump()), value);
    }
}
