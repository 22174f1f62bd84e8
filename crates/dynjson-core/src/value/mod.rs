//! Dynamic JSON value storage
//!
//! [`JsonValue`] is the tagged-union node at the center of the engine: one
//! enum holding any of the seven JSON shapes, with container variants owning
//! their heap storage outright. The facade API here composes storage,
//! parsing, serialization, and traversal behind one type.

mod cmp;
mod convert;
mod index;
mod iter;

pub use iter::ValueIter;

use std::io::{Read, Write};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{JsonError, Result};
use crate::parser::ParseOptions;
use crate::serializer::DumpOptions;

/// Backing container for array values.
pub type Array = Vec<JsonValue>;

/// Backing container for object values.
///
/// Keys are unique; iteration order is a property of the container and not
/// part of the engine's contract.
pub type Object = IndexMap<String, JsonValue>;

/// Runtime tag discriminating the active [`JsonValue`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Whole number in `i64` range
    Integer,
    /// Double-precision number
    Float,
    /// UTF-8 string
    String,
    /// Ordered sequence of values
    Array,
    /// Keyed collection of values
    Object,
}

impl JsonKind {
    /// Human-readable kind name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Integer => "integer",
            JsonKind::Float => "float",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

/// One JSON value: a scalar stored inline, or a container owned on the heap.
///
/// Exactly one variant is active at a time. Cloning deep-copies the whole
/// subtree; moving transfers ownership of the container handle; dropping
/// releases everything exactly once. Scalars allocate nothing.
#[derive(Debug, Clone, Default)]
pub enum JsonValue {
    /// `null`
    #[default]
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Whole number in `i64` range
    Integer(i64),
    /// Double-precision number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Ordered sequence of values
    Array(Array),
    /// Keyed collection of values
    Object(Object),
}

impl JsonValue {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a null value.
    pub fn null() -> Self {
        JsonValue::Null
    }

    /// Create a boolean value.
    pub fn bool(value: bool) -> Self {
        JsonValue::Bool(value)
    }

    /// Create an integer value.
    pub fn integer(value: i64) -> Self {
        JsonValue::Integer(value)
    }

    /// Create a float value.
    pub fn float(value: f64) -> Self {
        JsonValue::Float(value)
    }

    /// Create a string value.
    pub fn string(value: impl Into<String>) -> Self {
        JsonValue::String(value.into())
    }

    /// Create an array value.
    pub fn array(items: Array) -> Self {
        JsonValue::Array(items)
    }

    /// Create an object value.
    pub fn object(members: Object) -> Self {
        JsonValue::Object(members)
    }

    /// Default storage for the given kind: containers empty, scalars zero
    /// or false.
    pub fn with_kind(kind: JsonKind) -> Self {
        match kind {
            JsonKind::Null => JsonValue::Null,
            JsonKind::Bool => JsonValue::Bool(false),
            JsonKind::Integer => JsonValue::Integer(0),
            JsonKind::Float => JsonValue::Float(0.0),
            JsonKind::String => JsonValue::String(String::new()),
            JsonKind::Array => JsonValue::Array(Array::new()),
            JsonKind::Object => JsonValue::Object(Object::new()),
        }
    }

    // ------------------------------------------------------------------
    // Kind inspection
    // ------------------------------------------------------------------

    /// The active variant's tag.
    pub fn kind(&self) -> JsonKind {
        match self {
            JsonValue::Null => JsonKind::Null,
            JsonValue::Bool(_) => JsonKind::Bool,
            JsonValue::Integer(_) => JsonKind::Integer,
            JsonValue::Float(_) => JsonKind::Float,
            JsonValue::String(_) => JsonKind::String,
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::Object(_) => JsonKind::Object,
        }
    }

    /// Human-readable kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    /// True for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// True for booleans.
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// True for integers.
    pub fn is_integer(&self) -> bool {
        matches!(self, JsonValue::Integer(_))
    }

    /// True for floats.
    pub fn is_float(&self) -> bool {
        matches!(self, JsonValue::Float(_))
    }

    /// True for integers and floats.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Integer(_) | JsonValue::Float(_))
    }

    /// True for strings.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// True for arrays.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// True for objects.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// True for everything that is not an array or object.
    pub fn is_primitive(&self) -> bool {
        !self.is_structured()
    }

    /// True for arrays and objects.
    pub fn is_structured(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    // ------------------------------------------------------------------
    // Scalar and container access
    // ------------------------------------------------------------------

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The numeric payload as a float; integers promote.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Integer(value) => Some(*value as f64),
            JsonValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// The element sequence, if this is an array.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable element sequence, if this is an array.
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The member map, if this is an object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            JsonValue::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Mutable member map, if this is an object.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            JsonValue::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Number of children: 0 for null, 1 for other scalars, element count
    /// for containers.
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Null => 0,
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(members) => members.len(),
            _ => 1,
        }
    }

    /// True when `len()` is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Reset the payload in place without changing the kind: scalars go to
    /// zero/false, containers are emptied but keep their storage, null is
    /// untouched. Idempotent.
    pub fn clear(&mut self) {
        match self {
            JsonValue::Null => {}
            JsonValue::Bool(value) => *value = false,
            JsonValue::Integer(value) => *value = 0,
            JsonValue::Float(value) => *value = 0.0,
            JsonValue::String(value) => value.clear(),
            JsonValue::Array(items) => items.clear(),
            JsonValue::Object(members) => members.clear(),
        }
    }

    /// Move the value out, leaving null behind. The ownership-transfer
    /// counterpart of [`Clone`]: no subtree is copied and the source is
    /// left valid.
    pub fn take(&mut self) -> JsonValue {
        std::mem::take(self)
    }

    /// Exchange two values in O(1) without allocating.
    pub fn swap(&mut self, other: &mut JsonValue) {
        std::mem::swap(self, other);
    }

    // ------------------------------------------------------------------
    // Object and array operations
    // ------------------------------------------------------------------

    /// Member value for `key`, if this is an object holding it.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|members| members.get(key))
    }

    /// Mutable member value for `key`, if this is an object holding it.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        self.as_object_mut().and_then(|members| members.get_mut(key))
    }

    /// Element at `index`, if this is an array long enough.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Walk a `.`-separated key path through nested objects.
    pub fn get_path(&self, path: &str) -> Option<&JsonValue> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Set a `.`-separated key path, creating intermediate objects as
    /// needed. Returns false when this value or an existing intermediate
    /// node is not an object, or the path is empty.
    pub fn set_path(&mut self, path: &str, value: JsonValue) -> bool {
        if path.is_empty() || !self.is_object() {
            return false;
        }
        let mut current = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            let JsonValue::Object(members) = current else {
                return false;
            };
            if segments.peek().is_none() {
                members.insert(segment.to_string(), value);
                return true;
            }
            current = members
                .entry(segment.to_string())
                .or_insert_with(|| JsonValue::Object(Object::new()));
        }
        false
    }

    /// Append to an array.
    pub fn push(&mut self, value: impl Into<JsonValue>) -> Result<()> {
        match self {
            JsonValue::Array(items) => {
                items.push(value.into());
                Ok(())
            }
            _ => Err(JsonError::type_error(format!(
                "cannot push onto {}",
                self.kind_name()
            ))),
        }
    }

    /// Insert a member into an object, returning the previous value for the
    /// key if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Result<Option<JsonValue>> {
        match self {
            JsonValue::Object(members) => Ok(members.insert(key.into(), value.into())),
            _ => Err(JsonError::type_error(format!(
                "cannot insert a key into {}",
                self.kind_name()
            ))),
        }
    }

    /// Erase a member by key. `Ok(None)` when the key is absent; an
    /// invalid-key error when this is not an object.
    pub fn remove_key(&mut self, key: &str) -> Result<Option<JsonValue>> {
        match self {
            JsonValue::Object(members) => Ok(members.shift_remove(key)),
            _ => Err(JsonError::invalid_key(format!(
                "cannot erase key {key:?} from {}",
                self.kind_name()
            ))),
        }
    }

    /// Erase an element by position. An invalid-key error when this is not
    /// an array or the index is out of range.
    pub fn remove_index(&mut self, index: usize) -> Result<JsonValue> {
        match self {
            JsonValue::Array(items) => {
                if index < items.len() {
                    Ok(items.remove(index))
                } else {
                    Err(JsonError::invalid_key(format!(
                        "index {index} is out of range for array of length {}",
                        items.len()
                    )))
                }
            }
            _ => Err(JsonError::invalid_key(format!(
                "cannot erase index {index} from {}",
                self.kind_name()
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Cursor over this value's children, positioned at begin.
    ///
    /// Works uniformly over arrays, objects, and primitives: a non-null
    /// primitive yields itself exactly once, null yields nothing.
    pub fn iter_children(&self) -> ValueIter<'_> {
        ValueIter::begin(self)
    }

    /// Key/value pairs of an object, in the container's iteration order.
    pub fn entries(&self) -> Option<impl Iterator<Item = (&str, &JsonValue)>> {
        self.as_object()
            .map(|members| members.iter().map(|(key, value)| (key.as_str(), value)))
    }

    // ------------------------------------------------------------------
    // Parse and dump entry points
    // ------------------------------------------------------------------

    /// Parse a JSON document from text.
    pub fn parse(text: &str) -> Result<JsonValue> {
        crate::parser::from_str(text)
    }

    /// Parse a JSON document from text with explicit options.
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<JsonValue> {
        crate::parser::from_str_with(text, options)
    }

    /// Parse a JSON document from a byte buffer.
    pub fn parse_slice(bytes: &[u8]) -> Result<JsonValue> {
        crate::parser::from_slice(bytes)
    }

    /// Parse a JSON document from a byte buffer with explicit options.
    pub fn parse_slice_with(bytes: &[u8], options: &ParseOptions) -> Result<JsonValue> {
        crate::parser::from_slice_with(bytes, options)
    }

    /// Parse a JSON document from a reader (file handle, socket, stdin).
    pub fn parse_reader<R: Read>(reader: R) -> Result<JsonValue> {
        crate::parser::from_reader(reader)
    }

    /// Parse a JSON document from a reader with explicit options.
    pub fn parse_reader_with<R: Read>(reader: R, options: &ParseOptions) -> Result<JsonValue> {
        crate::parser::from_reader_with(reader, options)
    }

    /// Serialize to compact text with non-ASCII escaped.
    pub fn dump(&self) -> String {
        crate::serializer::to_string(self)
    }

    /// Serialize to indented text with `indent` spaces per level.
    pub fn dump_pretty(&self, indent: usize) -> String {
        crate::serializer::to_string_pretty(self, indent)
    }

    /// Serialize to text with explicit options.
    pub fn dump_with(&self, options: &DumpOptions) -> String {
        crate::serializer::dump_to_string(self, options)
    }

    /// Serialize through any writer with explicit options.
    pub fn dump_to_writer<W: Write>(&self, writer: W, options: &DumpOptions) -> Result<()> {
        crate::serializer::to_writer(writer, self, options)
    }
}

/// Extraction equivalent of [`JsonValue::parse`].
impl FromStr for JsonValue {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<JsonValue> {
        JsonValue::parse(s)
    }
}
