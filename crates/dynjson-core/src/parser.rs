//! Recursive-descent JSON parser
//!
//! Consumes [`Token`]s with one token of lookahead and builds a
//! [`JsonValue`] tree. The first grammar violation aborts the parse; there
//! is no recovery and the partially built tree is discarded with the error.

use std::io::{BufReader, Read};

use crate::error::{JsonError, Result};
use crate::io::{ByteSource, ReadInput, SliceInput};
use crate::lexer::{Lexer, Token};
use crate::value::{JsonValue, Object};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum container nesting depth before the parse is aborted.
    ///
    /// Keeps deeply nested input from exhausting the call stack; exceeding
    /// the limit is an ordinary parse error.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Parse a JSON document from a string.
pub fn from_str(text: &str) -> Result<JsonValue> {
    from_str_with(text, &ParseOptions::default())
}

/// Parse a JSON document from a string with explicit options.
pub fn from_str_with(text: &str, options: &ParseOptions) -> Result<JsonValue> {
    from_slice_with(text.as_bytes(), options)
}

/// Parse a JSON document from a byte buffer.
pub fn from_slice(bytes: &[u8]) -> Result<JsonValue> {
    from_slice_with(bytes, &ParseOptions::default())
}

/// Parse a JSON document from a byte buffer with explicit options.
pub fn from_slice_with(bytes: &[u8], options: &ParseOptions) -> Result<JsonValue> {
    tracing::trace!(len = bytes.len(), "parsing JSON buffer");
    Parser::new(SliceInput::new(bytes), options)?.parse()
}

/// Parse a JSON document from any reader (file handle, socket, stdin).
pub fn from_reader<R: Read>(reader: R) -> Result<JsonValue> {
    from_reader_with(reader, &ParseOptions::default())
}

/// Parse a JSON document from any reader with explicit options.
pub fn from_reader_with<R: Read>(reader: R, options: &ParseOptions) -> Result<JsonValue> {
    tracing::trace!("parsing JSON stream");
    Parser::new(ReadInput::new(BufReader::new(reader)), options)?.parse()
}

/// Recursive-descent parser over a token stream.
struct Parser<'o, I> {
    lexer: Lexer<I>,
    options: &'o ParseOptions,
}

impl<'o, I: ByteSource> Parser<'o, I> {
    fn new(input: I, options: &'o ParseOptions) -> Result<Self> {
        Ok(Self {
            lexer: Lexer::new(input)?,
            options,
        })
    }

    /// Parse exactly one value followed by end-of-input.
    fn parse(mut self) -> Result<JsonValue> {
        let value = self.parse_value(0)?;
        match self.lexer.scan()? {
            Token::EndOfInput => Ok(value),
            other => Err(self.unexpected(&other, "end of input")),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<JsonValue> {
        let token = self.lexer.scan()?;
        self.parse_value_from(token, depth)
    }

    fn parse_value_from(&mut self, token: Token, depth: usize) -> Result<JsonValue> {
        if depth >= self.options.max_depth {
            return Err(JsonError::parse(
                self.lexer.position(),
                "maximum nesting depth exceeded",
            ));
        }
        match token {
            Token::Null => Ok(JsonValue::Null),
            Token::True => Ok(JsonValue::Bool(true)),
            Token::False => Ok(JsonValue::Bool(false)),
            Token::Integer(value) => Ok(JsonValue::Integer(value)),
            Token::Float(value) => Ok(JsonValue::Float(value)),
            Token::String(value) => Ok(JsonValue::String(value)),
            Token::BeginArray => self.parse_array(depth),
            Token::BeginObject => self.parse_object(depth),
            other => Err(self.unexpected(&other, "a value")),
        }
    }

    /// `[` was consumed; parse elements until the matching `]`.
    fn parse_array(&mut self, depth: usize) -> Result<JsonValue> {
        let mut items = Vec::new();
        let mut token = self.lexer.scan()?;
        if token == Token::EndArray {
            return Ok(JsonValue::Array(items));
        }
        loop {
            items.push(self.parse_value_from(token, depth + 1)?);
            match self.lexer.scan()? {
                Token::ValueSeparator => token = self.lexer.scan()?,
                Token::EndArray => return Ok(JsonValue::Array(items)),
                other => return Err(self.unexpected(&other, "',' or ']'")),
            }
        }
    }

    /// `{` was consumed; parse key/value members until the matching `}`.
    /// A repeated key keeps the last value.
    fn parse_object(&mut self, depth: usize) -> Result<JsonValue> {
        let mut object = Object::new();
        let mut token = self.lexer.scan()?;
        if token == Token::EndObject {
            return Ok(JsonValue::Object(object));
        }
        loop {
            let Token::String(key) = token else {
                return Err(self.unexpected(&token, "an object key"));
            };
            match self.lexer.scan()? {
                Token::NameSeparator => {}
                other => return Err(self.unexpected(&other, "':'")),
            }
            let value = self.parse_value(depth + 1)?;
            object.insert(key, value);
            match self.lexer.scan()? {
                Token::ValueSeparator => token = self.lexer.scan()?,
                Token::EndObject => return Ok(JsonValue::Object(object)),
                other => return Err(self.unexpected(&other, "',' or '}'")),
            }
        }
    }

    fn unexpected(&self, token: &Token, expected: &str) -> JsonError {
        JsonError::parse(
            self.lexer.position(),
            format!("unexpected {}, expected {expected}", token.describe()),
        )
    }
}
