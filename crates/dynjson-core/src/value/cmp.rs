//! Equality, ordering, and hashing for [`JsonValue`]
//!
//! Comparison is tag-first with one exception: integers and floats compare
//! cross-type by numeric promotion, so `1` and `1.0` are equal. Everything
//! else follows a fixed kind ranking.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::{JsonKind, JsonValue};

/// Fixed ranking used when two kinds cannot compare by payload.
/// Integers and floats share a rank; their payloads decide instead.
fn rank(kind: JsonKind) -> u8 {
    match kind {
        JsonKind::Null => 0,
        JsonKind::Bool => 1,
        JsonKind::Integer | JsonKind::Float => 2,
        JsonKind::String => 3,
        JsonKind::Array => 4,
        JsonKind::Object => 5,
    }
}

impl PartialEq for JsonValue {
    fn eq(&self, other: &JsonValue) -> bool {
        use JsonValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(a), Float(b)) | (Float(b), Integer(a)) => (*a as f64) == *b,
            (String(a), String(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for JsonValue {
    fn partial_cmp(&self, other: &JsonValue) -> Option<Ordering> {
        use JsonValue::*;
        match (self, other) {
            (Null, Null) => Some(Ordering::Equal),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Array(a), Array(b)) => a.partial_cmp(b),
            // The member map has no defined iteration order, so objects
            // only order when equal.
            (Object(a), Object(b)) => (a == b).then_some(Ordering::Equal),
            _ => Some(rank(self.kind()).cmp(&rank(other.kind()))),
        }
    }
}

impl Hash for JsonValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            JsonValue::Null => 0u8.hash(state),
            JsonValue::Bool(value) => {
                1u8.hash(state);
                value.hash(state);
            }
            JsonValue::Integer(value) => {
                2u8.hash(state);
                value.hash(state);
            }
            JsonValue::Float(value) => {
                3u8.hash(state);
                value.to_bits().hash(state);
            }
            JsonValue::String(value) => {
                4u8.hash(state);
                value.hash(state);
            }
            JsonValue::Array(items) => {
                5u8.hash(state);
                items.len().hash(state);
                for item in items {
                    item.hash(state);
                }
            }
            JsonValue::Object(members) => {
                6u8.hash(state);
                members.len().hash(state);
                // Sort keys so logically equal maps hash alike regardless
                // of member order.
                let mut pairs: Vec<_> = members.iter().collect();
                pairs.sort_unstable_by_key(|(key, _)| *key);
                for (key, value) in pairs {
                    key.hash(state);
                    value.hash(state);
                }
            }
        }
    }
}
