//! Pull-based JSON lexer
//!
//! A state machine over a single pulled byte: the lexer owns exactly one
//! byte of lookahead (`current`) and classifies it into structural tokens,
//! literals, strings, and numbers. Lexical violations surface as
//! [`JsonError::Parse`] carrying the byte offset at which they were raised.

use smallvec::SmallVec;

use crate::error::{JsonError, Result};
use crate::io::ByteSource;

/// One classified token of JSON input.
///
/// String and number tokens carry their decoded payload; the integer/float
/// split is resolved here (a fraction or exponent makes the token a float)
/// so the parser can pick the matching value variant by token kind alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// Quoted string, unescaped
    String(String),
    /// Number without fraction or exponent
    Integer(i64),
    /// Number with fraction or exponent, or one too large for `i64`
    Float(f64),
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `:`
    NameSeparator,
    /// `,`
    ValueSeparator,
    /// Input exhausted
    EndOfInput,
}

impl Token {
    /// Short description used in parser error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::True => "literal 'true'",
            Token::False => "literal 'false'",
            Token::Null => "literal 'null'",
            Token::String(_) => "string",
            Token::Integer(_) | Token::Float(_) => "number",
            Token::BeginArray => "'['",
            Token::EndArray => "']'",
            Token::BeginObject => "'{'",
            Token::EndObject => "'}'",
            Token::NameSeparator => "':'",
            Token::ValueSeparator => "','",
            Token::EndOfInput => "end of input",
        }
    }
}

/// Tokenizer over a [`ByteSource`].
#[derive(Debug)]
pub struct Lexer<I> {
    input: I,
    current: Option<u8>,
    position: usize,
}

impl<I: ByteSource> Lexer<I> {
    /// Create a lexer and prime the one-byte lookahead.
    pub fn new(input: I) -> Result<Self> {
        let mut lexer = Self {
            input,
            current: None,
            position: 0,
        };
        lexer.get()?;
        Ok(lexer)
    }

    /// Byte offset of the current lookahead (1-based; 0 before any input).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Pull the next byte. A NUL byte terminates the input like end-of-stream.
    fn get(&mut self) -> Result<()> {
        self.current = match self.input.next_byte()? {
            Some(0) | None => None,
            byte => {
                self.position += 1;
                byte
            }
        };
        Ok(())
    }

    fn error(&self, message: impl Into<String>) -> JsonError {
        JsonError::parse(self.position, message)
    }

    /// Skip whitespace and produce the next token.
    pub fn scan(&mut self) -> Result<Token> {
        while matches!(self.current, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.get()?;
        }
        let Some(c) = self.current else {
            return Ok(Token::EndOfInput);
        };
        match c {
            b'[' => self.structural(Token::BeginArray),
            b']' => self.structural(Token::EndArray),
            b'{' => self.structural(Token::BeginObject),
            b'}' => self.structural(Token::EndObject),
            b':' => self.structural(Token::NameSeparator),
            b',' => self.structural(Token::ValueSeparator),
            b't' => self.scan_literal(b"true", Token::True),
            b'f' => self.scan_literal(b"false", Token::False),
            b'n' => self.scan_literal(b"null", Token::Null),
            b'"' => self.scan_string(),
            b'-' | b'0'..=b'9' => self.scan_number(),
            _ => Err(self.error(format!("unexpected character {:?}", c as char))),
        }
    }

    fn structural(&mut self, token: Token) -> Result<Token> {
        self.get()?;
        Ok(token)
    }

    /// Match a literal byte-for-byte; any deviation is a parse error.
    fn scan_literal(&mut self, literal: &'static [u8], token: Token) -> Result<Token> {
        for &expected in literal {
            if self.current != Some(expected) {
                return Err(self.error("invalid literal"));
            }
            self.get()?;
        }
        Ok(token)
    }

    fn scan_string(&mut self) -> Result<Token> {
        // current is the opening quote
        self.get()?;
        let mut buf: Vec<u8> = Vec::new();
        loop {
            let Some(c) = self.current else {
                return Err(self.error("unterminated string"));
            };
            match c {
                b'"' => {
                    self.get()?;
                    break;
                }
                b'\\' => {
                    self.get()?;
                    self.scan_escape(&mut buf)?;
                }
                0x00..=0x1F => {
                    return Err(self.error(format!(
                        "control character U+{:04X} must be escaped",
                        u32::from(c)
                    )));
                }
                _ => {
                    buf.push(c);
                    self.get()?;
                }
            }
        }
        String::from_utf8(buf)
            .map(Token::String)
            .map_err(|_| self.error("invalid UTF-8 in string"))
    }

    /// Decode the escape whose introducing backslash was already consumed.
    fn scan_escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let Some(c) = self.current else {
            return Err(self.error("unterminated string"));
        };
        let simple = match c {
            b'"' => Some(b'"'),
            b'\\' => Some(b'\\'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'u' => None,
            _ => {
                return Err(self.error(format!("invalid escape character {:?}", c as char)));
            }
        };
        match simple {
            Some(byte) => {
                buf.push(byte);
                self.get()?;
                Ok(())
            }
            None => self.scan_unicode_escape(buf),
        }
    }

    /// `\uXXXX`, with surrogate pairs combined into one code point.
    fn scan_unicode_escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let first = self.scan_hex4()?;
        let code = if (0xD800..=0xDBFF).contains(&first) {
            if self.current != Some(b'\\') {
                return Err(self.error("expected low surrogate escape after high surrogate"));
            }
            self.get()?;
            if self.current != Some(b'u') {
                return Err(self.error("expected low surrogate escape after high surrogate"));
            }
            let second = self.scan_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&second) {
                return Err(self.error("invalid low surrogate"));
            }
            0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
        } else if (0xDC00..=0xDFFF).contains(&first) {
            return Err(self.error("unpaired low surrogate"));
        } else {
            first
        };
        let ch = char::from_u32(code).ok_or_else(|| self.error("invalid code point"))?;
        let mut utf8 = [0u8; 4];
        buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
        Ok(())
    }

    /// Exactly four case-insensitive hex digits; `current` is the `u`.
    fn scan_hex4(&mut self) -> Result<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            self.get()?;
            let digit = match self.current {
                Some(c @ b'0'..=b'9') => u32::from(c - b'0'),
                Some(c @ b'a'..=b'f') => u32::from(c - b'a') + 10,
                Some(c @ b'A'..=b'F') => u32::from(c - b'A') + 10,
                _ => return Err(self.error("expected four hex digits in unicode escape")),
            };
            value = value * 16 + digit;
        }
        self.get()?;
        Ok(value)
    }

    fn scan_number(&mut self) -> Result<Token> {
        let mut lexeme: SmallVec<[u8; 32]> = SmallVec::new();
        let mut negative = false;
        if self.current == Some(b'-') {
            negative = true;
            lexeme.push(b'-');
            self.get()?;
        }
        let mut magnitude: u64 = 0;
        let mut overflowed = false;
        match self.current {
            Some(b'0') => {
                lexeme.push(b'0');
                self.get()?;
                if matches!(self.current, Some(b'0'..=b'9')) {
                    return Err(self.error("leading zeros are not allowed"));
                }
            }
            Some(b'1'..=b'9') => {
                while let Some(c @ b'0'..=b'9') = self.current {
                    lexeme.push(c);
                    match magnitude
                        .checked_mul(10)
                        .and_then(|m| m.checked_add(u64::from(c - b'0')))
                    {
                        Some(m) => magnitude = m,
                        None => overflowed = true,
                    }
                    self.get()?;
                }
            }
            _ => return Err(self.error("expected digit")),
        }
        let mut is_float = false;
        if self.current == Some(b'.') {
            is_float = true;
            lexeme.push(b'.');
            self.get()?;
            let mut saw_digit = false;
            while let Some(c @ b'0'..=b'9') = self.current {
                saw_digit = true;
                lexeme.push(c);
                self.get()?;
            }
            if !saw_digit {
                return Err(self.error("expected digit after decimal point"));
            }
        }
        if matches!(self.current, Some(b'e' | b'E')) {
            is_float = true;
            lexeme.push(b'e');
            self.get()?;
            if matches!(self.current, Some(b'+' | b'-')) {
                if self.current == Some(b'-') {
                    lexeme.push(b'-');
                }
                self.get()?;
            }
            let mut saw_digit = false;
            while let Some(c @ b'0'..=b'9') = self.current {
                saw_digit = true;
                lexeme.push(c);
                self.get()?;
            }
            if !saw_digit {
                return Err(self.error("expected digit in exponent"));
            }
        }
        if !is_float && !overflowed {
            // i64::MIN has no positive counterpart; wrapping_neg folds the
            // one out-of-range magnitude back onto it.
            if negative && magnitude <= i64::MIN.unsigned_abs() {
                return Ok(Token::Integer((magnitude as i64).wrapping_neg()));
            }
            if !negative && magnitude <= i64::MAX as u64 {
                return Ok(Token::Integer(magnitude as i64));
            }
        }
        let text = std::str::from_utf8(&lexeme).map_err(|_| self.error("invalid number"))?;
        let value: f64 = text.parse().map_err(|_| self.error("invalid number"))?;
        Ok(Token::Float(value))
    }
}
