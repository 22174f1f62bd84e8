//! JSON serialization
//!
//! Walks a [`JsonValue`] tree and writes compact or indented text through a
//! [`JsonSink`]. Nothing is buffered beyond one number at a time, so the
//! whole document is only materialized when the caller picked the string
//! sink.

use std::fmt;
use std::io::Write;

use smallvec::SmallVec;

use crate::error::Result;
use crate::io::{JsonSink, WriteSink};
use crate::value::JsonValue;

/// Serializer configuration.
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// `None` for compact output, `Some(n)` for `n` indent characters per
    /// nesting level.
    pub indent: Option<usize>,
    /// Character repeated to build one indent step.
    pub indent_char: char,
    /// Escape every code point above 0x7E as `\uXXXX`.
    pub escape_non_ascii: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            indent: None,
            indent_char: ' ',
            escape_non_ascii: true,
        }
    }
}

impl DumpOptions {
    /// Compact output, non-ASCII escaped.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented output with `indent` spaces per level.
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }
}

/// Serialize a value to a compact string.
pub fn to_string(value: &JsonValue) -> String {
    dump_to_string(value, &DumpOptions::default())
}

/// Serialize a value to an indented string.
pub fn to_string_pretty(value: &JsonValue, indent: usize) -> String {
    dump_to_string(value, &DumpOptions::pretty(indent))
}

/// Serialize a value to a string with explicit options.
pub fn dump_to_string(value: &JsonValue, options: &DumpOptions) -> String {
    let mut out = String::new();
    let mut serializer = Serializer::new(&mut out, options);
    match serializer.dump(value, options.indent.is_some(), options.indent.unwrap_or(0), 0) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    out
}

/// Serialize a value to any writer with explicit options.
pub fn to_writer<W: Write>(writer: W, value: &JsonValue, options: &DumpOptions) -> Result<()> {
    tracing::trace!("serializing JSON value to writer");
    let mut sink = WriteSink::new(writer);
    let mut serializer = Serializer::new(&mut sink, options);
    serializer.dump(value, options.indent.is_some(), options.indent.unwrap_or(0), 0)
}

/// Tree walker writing through a [`JsonSink`].
pub struct Serializer<'s, S> {
    sink: &'s mut S,
    indent_char: char,
    escape_non_ascii: bool,
    indent_string: String,
    number_buf: SmallVec<[u8; 24]>,
}

impl<'s, S: JsonSink> Serializer<'s, S> {
    /// Create a serializer writing into `sink`.
    pub fn new(sink: &'s mut S, options: &DumpOptions) -> Self {
        Self {
            sink,
            indent_char: options.indent_char,
            escape_non_ascii: options.escape_non_ascii,
            indent_string: String::new(),
            number_buf: SmallVec::new(),
        }
    }

    /// Serialize `value` at `current_indent` nesting characters.
    pub fn dump(
        &mut self,
        value: &JsonValue,
        pretty: bool,
        indent_step: usize,
        current_indent: usize,
    ) -> std::result::Result<(), S::Error> {
        match value {
            JsonValue::Null => self.sink.write_str("null"),
            JsonValue::Bool(true) => self.sink.write_str("true"),
            JsonValue::Bool(false) => self.sink.write_str("false"),
            JsonValue::Integer(value) => self.dump_integer(*value),
            JsonValue::Float(value) => self.dump_float(*value),
            JsonValue::String(value) => self.dump_string(value),
            JsonValue::Array(items) => {
                if items.is_empty() {
                    return self.sink.write_str("[]");
                }
                if pretty {
                    let child_indent = current_indent + indent_step;
                    self.sink.write_str("[\n")?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            self.sink.write_str(",\n")?;
                        }
                        self.write_indent(child_indent)?;
                        self.dump(item, pretty, indent_step, child_indent)?;
                    }
                    self.sink.put_char('\n')?;
                    self.write_indent(current_indent)?;
                    self.sink.put_char(']')
                } else {
                    self.sink.put_char('[')?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            self.sink.put_char(',')?;
                        }
                        self.dump(item, false, indent_step, current_indent)?;
                    }
                    self.sink.put_char(']')
                }
            }
            JsonValue::Object(members) => {
                if members.is_empty() {
                    return self.sink.write_str("{}");
                }
                if pretty {
                    let child_indent = current_indent + indent_step;
                    self.sink.write_str("{\n")?;
                    for (i, (key, member)) in members.iter().enumerate() {
                        if i > 0 {
                            self.sink.write_str(",\n")?;
                        }
                        self.write_indent(child_indent)?;
                        self.dump_string(key)?;
                        self.sink.write_str(": ")?;
                        self.dump(member, pretty, indent_step, child_indent)?;
                    }
                    self.sink.put_char('\n')?;
                    self.write_indent(current_indent)?;
                    self.sink.put_char('}')
                } else {
                    self.sink.put_char('{')?;
                    for (i, (key, member)) in members.iter().enumerate() {
                        if i > 0 {
                            self.sink.put_char(',')?;
                        }
                        self.dump_string(key)?;
                        self.sink.put_char(':')?;
                        self.dump(member, false, indent_step, current_indent)?;
                    }
                    self.sink.put_char('}')
                }
            }
        }
    }

    /// Write `depth` indent characters, growing the shared indent buffer by
    /// doubling when the requested depth exceeds its capacity.
    fn write_indent(&mut self, depth: usize) -> std::result::Result<(), S::Error> {
        let width = self.indent_char.len_utf8();
        let needed = depth * width;
        if needed > self.indent_string.len() {
            let mut capacity = self.indent_string.len().max(width * 16);
            while capacity < needed {
                capacity *= 2;
            }
            self.indent_string = std::iter::repeat(self.indent_char)
                .take(capacity / width)
                .collect();
        }
        self.sink.write_str(&self.indent_string[..needed])
    }

    fn dump_string(&mut self, value: &str) -> std::result::Result<(), S::Error> {
        self.sink.put_char('"')?;
        for c in value.chars() {
            match c {
                '"' => self.sink.write_str("\\\"")?,
                '\\' => self.sink.write_str("\\\\")?,
                '\n' => self.sink.write_str("\\n")?,
                '\r' => self.sink.write_str("\\r")?,
                '\t' => self.sink.write_str("\\t")?,
                '\u{8}' => self.sink.write_str("\\b")?,
                '\u{c}' => self.sink.write_str("\\f")?,
                c if (c as u32) < 0x20 => self.write_escaped_code_unit(c as u32 as u16)?,
                c if !self.escape_non_ascii || (c as u32) < 0x7F => self.sink.put_char(c)?,
                c => {
                    let code = c as u32;
                    if code <= 0xFFFF {
                        self.write_escaped_code_unit(code as u16)?;
                    } else {
                        let v = code - 0x10000;
                        self.write_escaped_code_unit(((v >> 10) + 0xD800) as u16)?;
                        self.write_escaped_code_unit(((v & 0x3FF) + 0xDC00) as u16)?;
                    }
                }
            }
        }
        self.sink.put_char('"')
    }

    fn write_escaped_code_unit(&mut self, unit: u16) -> std::result::Result<(), S::Error> {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        self.sink.write_str("\\u")?;
        for shift in [12u32, 8, 4, 0] {
            let nibble = usize::from((unit >> shift) & 0xF);
            self.sink.put_char(HEX[nibble] as char)?;
        }
        Ok(())
    }

    /// Digits extracted by repeated modulo 10 into the reusable buffer,
    /// least significant first, then written out in reverse.
    fn dump_integer(&mut self, value: i64) -> std::result::Result<(), S::Error> {
        if value == 0 {
            return self.sink.put_char('0');
        }
        self.number_buf.clear();
        let mut magnitude = value.unsigned_abs();
        while magnitude > 0 {
            self.number_buf.push(b'0' + (magnitude % 10) as u8);
            magnitude /= 10;
        }
        if value < 0 {
            self.sink.put_char('-')?;
        }
        for i in (0..self.number_buf.len()).rev() {
            let digit = self.number_buf[i];
            self.sink.put_char(digit as char)?;
        }
        Ok(())
    }

    /// Shortest text that parses back to the identical bit pattern.
    /// NaN and infinities have no JSON spelling and come out as `null`.
    fn dump_float(&mut self, value: f64) -> std::result::Result<(), S::Error> {
        if !value.is_finite() {
            return self.sink.write_str("null");
        }
        let abs = value.abs();
        let text = if abs != 0.0 && (abs < 1e-5 || abs >= 1e17) {
            format!("{value:e}")
        } else {
            format!("{value}")
        };
        self.sink.write_str(&text)
    }
}

struct FmtSink<'a, 'b> {
    inner: &'a mut fmt::Formatter<'b>,
}

impl JsonSink for FmtSink<'_, '_> {
    type Error = fmt::Error;

    fn put_char(&mut self, c: char) -> fmt::Result {
        fmt::Write::write_char(self.inner, c)
    }

    fn write_str(&mut self, s: &str) -> fmt::Result {
        fmt::Write::write_str(self.inner, s)
    }
}

/// Compact form with non-ASCII passed through as UTF-8.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = DumpOptions {
            escape_non_ascii: false,
            ..DumpOptions::default()
        };
        let mut sink = FmtSink { inner: f };
        let mut serializer = Serializer::new(&mut sink, &options);
        serializer.dump(self, false, 0, 0)
    }
}
