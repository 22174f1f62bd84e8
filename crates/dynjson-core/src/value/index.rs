//! Bracket indexing for [`JsonValue`]
//!
//! Follows the ecosystem convention: shared indexing of a missing member
//! yields null instead of panicking, mutable indexing by key builds the
//! path (null promotes to an empty object, missing keys spring into
//! existence as null), and mutable indexing of a mismatched kind panics.

use std::ops::{Index, IndexMut};

use super::{JsonValue, Object};

static NULL: JsonValue = JsonValue::Null;

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        self.as_array().and_then(|items| items.get(index)).unwrap_or(&NULL)
    }
}

impl IndexMut<usize> for JsonValue {
    fn index_mut(&mut self, index: usize) -> &mut JsonValue {
        match self {
            JsonValue::Array(items) => {
                let len = items.len();
                items.get_mut(index).unwrap_or_else(|| {
                    panic!("index {index} is out of range for array of length {len}")
                })
            }
            other => panic!("cannot index {} with a number", other.kind_name()),
        }
    }
}

impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        self.get(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for JsonValue {
    fn index_mut(&mut self, key: &str) -> &mut JsonValue {
        if self.is_null() {
            *self = JsonValue::Object(Object::new());
        }
        match self {
            JsonValue::Object(members) => members
                .entry(key.to_string())
                .or_insert(JsonValue::Null),
            other => panic!("cannot index {} with a key", other.kind_name()),
        }
    }
}
