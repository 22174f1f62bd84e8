//! Conversions in and out of [`JsonValue`]
//!
//! Infallible `From` impls cover the natural constructions; checked scalar
//! extraction goes through `TryFrom` and raises the type-error category.
//! The serde impls and the `serde_json::Value` bridge keep the engine
//! interoperable with the wider ecosystem without changing its own model.

use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Array, JsonValue, Object};
use crate::error::JsonError;

// ----------------------------------------------------------------------
// From scalars and containers
// ----------------------------------------------------------------------

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i8> for JsonValue {
    fn from(value: i8) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<i16> for JsonValue {
    fn from(value: i16) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Integer(value)
    }
}

impl From<u8> for JsonValue {
    fn from(value: u8) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<u16> for JsonValue {
    fn from(value: u16) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<u32> for JsonValue {
    fn from(value: u32) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

/// Values beyond `i64` range degrade to float.
impl From<u64> for JsonValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => JsonValue::Integer(value),
            Err(_) => JsonValue::Float(value as f64),
        }
    }
}

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Float(f64::from(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Float(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<Array> for JsonValue {
    fn from(items: Array) -> Self {
        JsonValue::Array(items)
    }
}

impl From<Object> for JsonValue {
    fn from(members: Object) -> Self {
        JsonValue::Object(members)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<T: IntoIterator<Item = JsonValue>>(iter: T) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, JsonValue)> for JsonValue {
    fn from_iter<T: IntoIterator<Item = (String, JsonValue)>>(iter: T) -> Self {
        JsonValue::Object(iter.into_iter().collect())
    }
}

// ----------------------------------------------------------------------
// Checked scalar extraction
// ----------------------------------------------------------------------

impl TryFrom<&JsonValue> for bool {
    type Error = JsonError;

    fn try_from(value: &JsonValue) -> Result<Self, JsonError> {
        value.as_bool().ok_or_else(|| {
            JsonError::type_error(format!("cannot convert {} to boolean", value.kind_name()))
        })
    }
}

impl TryFrom<&JsonValue> for i64 {
    type Error = JsonError;

    fn try_from(value: &JsonValue) -> Result<Self, JsonError> {
        value.as_i64().ok_or_else(|| {
            JsonError::type_error(format!("cannot convert {} to integer", value.kind_name()))
        })
    }
}

impl TryFrom<&JsonValue> for f64 {
    type Error = JsonError;

    fn try_from(value: &JsonValue) -> Result<Self, JsonError> {
        value.as_f64().ok_or_else(|| {
            JsonError::type_error(format!("cannot convert {} to float", value.kind_name()))
        })
    }
}

impl TryFrom<&JsonValue> for String {
    type Error = JsonError;

    fn try_from(value: &JsonValue) -> Result<Self, JsonError> {
        value.as_str().map(str::to_string).ok_or_else(|| {
            JsonError::type_error(format!("cannot convert {} to string", value.kind_name()))
        })
    }
}

// ----------------------------------------------------------------------
// serde_json bridge
// ----------------------------------------------------------------------

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(value) => JsonValue::Bool(value),
            serde_json::Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    JsonValue::Integer(value)
                } else if let Some(value) = number.as_u64() {
                    JsonValue::from(value)
                } else {
                    number.as_f64().map_or(JsonValue::Null, JsonValue::Float)
                }
            }
            serde_json::Value::String(value) => JsonValue::String(value),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(members) => JsonValue::Object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Bool(value) => serde_json::Value::Bool(value),
            JsonValue::Integer(value) => serde_json::Value::Number(value.into()),
            JsonValue::Float(value) => serde_json::Number::from_f64(value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            JsonValue::String(value) => serde_json::Value::String(value),
            JsonValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            JsonValue::Object(members) => serde_json::Value::Object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

// ----------------------------------------------------------------------
// serde
// ----------------------------------------------------------------------

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(value) => serializer.serialize_bool(*value),
            JsonValue::Integer(value) => serializer.serialize_i64(*value),
            JsonValue::Float(value) => serializer.serialize_f64(*value),
            JsonValue::String(value) => serializer.serialize_str(value),
            JsonValue::Array(items) => items.serialize(serializer),
            JsonValue::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in members {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = JsonValue;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_unit<E>(self) -> Result<JsonValue, E> {
                Ok(JsonValue::Null)
            }

            fn visit_none<E>(self) -> Result<JsonValue, E> {
                Ok(JsonValue::Null)
            }

            fn visit_some<D: Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<JsonValue, D::Error> {
                JsonValue::deserialize(deserializer)
            }

            fn visit_bool<E>(self, value: bool) -> Result<JsonValue, E> {
                Ok(JsonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<JsonValue, E> {
                Ok(JsonValue::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<JsonValue, E> {
                Ok(JsonValue::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<JsonValue, E> {
                Ok(JsonValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<JsonValue, E> {
                Ok(JsonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<JsonValue, E> {
                Ok(JsonValue::String(value))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonValue, A::Error> {
                let mut items = Array::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(JsonValue::Array(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonValue, A::Error> {
                let mut members =
                    IndexMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
                    members.insert(key, value);
                }
                Ok(JsonValue::Object(members))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
