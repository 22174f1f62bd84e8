//! Error types for dynjson operations

/// Result type alias for dynjson operations
pub type Result<T> = std::result::Result<T, JsonError>;

/// Main error type for dynjson operations
///
/// One variant per failure category; every error is raised synchronously at
/// the point of violation and propagated to the caller. The engine never
/// retries and never salvages a partial result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JsonError {
    /// Operation requires a value of a different kind
    #[error("type error: {message}")]
    Type {
        /// Error description
        message: String,
    },

    /// Structural operation attempted on a node of the wrong shape
    #[error("invalid key: {message}")]
    InvalidKey {
        /// Error description
        message: String,
    },

    /// Iterator dereferenced, advanced, or compared outside its contract
    #[error("invalid iterator: {message}")]
    InvalidIterator {
        /// Error description
        message: String,
    },

    /// Lexical or grammatical violation while parsing
    #[error("parse error at position {position}: {message}")]
    Parse {
        /// Byte offset in the input where the error occurred
        position: usize,
        /// Error description
        message: String,
    },

    /// Input or output adapter failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl JsonError {
    /// Create a type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type {
            message: message.into(),
        }
    }

    /// Create an invalid key error
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    /// Create an invalid iterator error
    pub fn invalid_iterator(message: impl Into<String>) -> Self {
        Self::InvalidIterator {
            message: message.into(),
        }
    }

    /// Create a parse error at a byte offset
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// True if this error came from the parser or lexer
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<std::io::Error> for JsonError {
    fn from(err: std::io::Error) -> Self {
        JsonError::Io(err.to_string())
    }
}
