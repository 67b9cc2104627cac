//! Typed field extraction for entries that keep their unknown keys
//!
//! Entries are read as a whole JSON object first and their known fields are
//! taken out of it afterwards; whatever is left becomes `extra`. Reading the
//! object through `Value` keeps numbers of any size exact, which buffering a
//! flattened field does not.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

/// Remove `key` and decode it; absent is an error
pub(crate) fn required<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &'static str) -> Result<T, serde_json::Error> {
  match map.remove(key) {
    Some(value) => serde_json::from_value(value),
    None => Err(serde_json::Error::missing_field(key)),
  }
}

/// Remove `key` and decode it; absent or `null` gives the default
pub(crate) fn optional<T: DeserializeOwned + Default>(map: &mut Map<String, Value>, key: &str) -> Result<T, serde_json::Error> {
  match map.remove(key) {
    None | Some(Value::Null) => Ok(T::default()),
    Some(value) => serde_json::from_value(value),
  }
}
