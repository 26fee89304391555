// src/nutrients.rs

//! Nutrients codec
//!
//! Each recipe carries a mapping of nutrient name to free text
//! (`"calories" -> "389 kcal"`), stored as a JSON object in a TEXT column.
//! Decoding is total: absent, malformed or non-object input becomes an empty
//! mapping so one bad row never fails a request.

use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::debug;

/// Decoded nutrients mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Nutrients(Map<String, Value>);

impl Nutrients {
    /// Decode stored text; never fails
    pub fn decode(text: Option<&str>) -> Self {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                debug!("Ignoring malformed nutrients blob: {}", e);
                Self::default()
            }
        }
    }

    /// Keep JSON objects, treat anything else as empty
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Serialize for storage
    pub fn encode(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Text of one entry
    ///
    /// Strings are returned as-is and numbers in their decimal form; other
    /// JSON types have no text.
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.0.get(name)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }
}
