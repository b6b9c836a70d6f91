//! Sift core types: the event record and field-path access.

#![forbid(unsafe_code)]

pub mod paths;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors surfaced when decoding records at the host edge. Filters never see
/// these; a field that fails to resolve is simply absent to them.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event must be a JSON object at the top level")]
    NotAnObject,
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field-level access to a record. Filter stages depend on this capability
/// rather than on `Event` itself, so they can run against any host record.
pub trait FieldAccess {
    /// Resolve `path` to a value. `None` when the path is invalid, a segment
    /// is missing, or a non-object intermediate blocks the walk.
    fn get_field(&self, path: &str) -> Option<&Value>;

    /// Write `value` at `path`, creating intermediate objects as needed.
    fn set_field(&mut self, path: &str, value: Value);
}

/// A single structured record flowing through the pipeline, addressable by
/// dotted field paths (`nested.foo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Build from a decoded JSON value; only top-level objects are events.
    pub fn from_value(v: Value) -> Result<Self, EventError> {
        match v {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(EventError::NotAnObject),
        }
    }

    /// Decode a single NDJSON line.
    pub fn from_json_str(s: &str) -> Result<Self, EventError> {
        Self::from_value(serde_json::from_str(s)?)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Encode as a single NDJSON line (no trailing newline).
    pub fn to_json_string(&self) -> Result<String, EventError> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get_field(path).is_some()
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

impl FieldAccess for Event {
    fn get_field(&self, path: &str) -> Option<&Value> {
        paths::resolve(&self.fields, path)
    }

    fn set_field(&mut self, path: &str, value: Value) {
        paths::write(&mut self.fields, path, value);
    }
}
