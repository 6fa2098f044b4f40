//! Struct conversion helpers
//!
//! Mapping ⇄ typed record conversion via a canonical serde_json round
//! trip, independent of the storage engine.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::entry::{type_name, Entry};
use crate::error::{NestError, Result};

/// Convert a field map into a typed value
pub fn map_to_struct<T: DeserializeOwned>(map: Entry) -> Result<T> {
    serde_json::from_value(Value::Object(map)).map_err(|e| NestError::Decode(e.to_string()))
}

/// Convert a serializable value into a field map
///
/// Fails with `TypeConversion` if the value does not serialize to an
/// object (e.g. a bare scalar or sequence).
pub fn struct_to_map<T: Serialize>(value: &T) -> Result<Entry> {
    let value = serde_json::to_value(value).map_err(|e| NestError::Encode(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(NestError::TypeConversion {
            expected: "object",
            actual: type_name(&other),
        }),
    }
}
