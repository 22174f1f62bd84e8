//! # dynjson
//!
//! A dynamic JSON value engine: one owned tree type ([`JsonValue`]) holding
//! any JSON shape, a strict pull-based parser, a compact/indented
//! serializer, and a checked cursor over a value's children.
//!
//! ```
//! use dynjson_rs::JsonValue;
//!
//! let mut config = JsonValue::parse(r#"{"retries": 3, "hosts": ["a", "b"]}"#)?;
//! config["retries"] = JsonValue::Integer(5);
//! config["hosts"].push("c")?;
//!
//! assert_eq!(config["hosts"].len(), 3);
//! assert_eq!(config.dump(), r#"{"retries":5,"hosts":["a","b","c"]}"#);
//! # Ok::<(), dynjson_rs::JsonError>(())
//! ```
//!
//! Parsing is strict JSON: the first grammar violation aborts with a
//! [`JsonError::Parse`] carrying the byte offset, and trailing content after
//! the document is rejected. Serialization round-trips every tree: numbers
//! come back bit-identical and the integer/float distinction survives.

#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod value;

pub use error::{JsonError, Result};
pub use io::{ByteSource, JsonSink, ReadInput, SliceInput, WriteSink};
pub use parser::{ParseOptions, from_reader, from_slice, from_str};
pub use serializer::{DumpOptions, Serializer, to_string, to_string_pretty, to_writer};
pub use value::{Array, JsonKind, JsonValue, Object, ValueIter};

/// Re-export of commonly used types
pub mod prelude {
    pub use super::{
        DumpOptions, JsonError, JsonKind, JsonValue, ParseOptions, Result, ValueIter,
    };
}

// Process-wide allocator hook: every container allocation in the engine
// routes through the global allocator, so swapping it swaps them all.
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
