//! Tool result returned by the connector service

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys that may carry the payload of a full result, in preference order
const PAYLOAD_KEYS: &[&str] = &["data", "result"];

const EXECUTION_ID_KEY: &str = "execution_id";

/// Result of a remote tool execution
///
/// Deserialization never fails: see [`ToolResult::from_document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolResult {
    /// Structured payload. `None` when the call produced no data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,

    /// Execution id assigned by the service, for traceability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,
}

impl ToolResult {
    /// Create a result carrying the given payload
    pub fn with_data(data: Map<String, Value>) -> Self {
        Self {
            data: Some(data),
            execution_id: None,
        }
    }

    /// Create a result with no payload
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the execution id
    pub fn with_execution_id<S: Into<String>>(mut self, execution_id: S) -> Self {
        self.execution_id = Some(execution_id.into());
        self
    }

    /// Build a result from an arbitrary JSON value.
    ///
    /// Objects become the payload; anything else yields a result without data.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::with_data(map),
            _ => Self::empty(),
        }
    }

    /// Read a JSON document as either a full result or a bare payload.
    ///
    /// A full result is an object whose `data` (or `result`) is an object or
    /// null, or one holding nothing but an `execution_id`. Every other object
    /// is taken as the payload itself, and non-objects yield no data.
    pub fn from_document(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::empty();
        };

        if !is_full_result(&map) {
            return Self::with_data(map);
        }

        let execution_id = match map.remove(EXECUTION_ID_KEY) {
            Some(Value::String(id)) => Some(id),
            _ => None,
        };
        let data = PAYLOAD_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Object(data)) => Some(data),
                _ => None,
            });

        Self { data, execution_id }
    }

    /// Payload if present and non-empty
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref().filter(|data| !data.is_empty())
    }

    /// Whether the result carries no usable payload
    pub fn is_empty(&self) -> bool {
        self.payload().is_none()
    }
}

impl<'de> Deserialize<'de> for ToolResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_document)
    }
}

fn is_full_result(map: &Map<String, Value>) -> bool {
    let id_shaped = map
        .get(EXECUTION_ID_KEY)
        .map_or(true, |id| id.is_string() || id.is_null());
    if !id_shaped {
        return false;
    }

    let payloads: Vec<&Value> = PAYLOAD_KEYS.iter().filter_map(|key| map.get(*key)).collect();
    if payloads.is_empty() {
        return map.len() == 1 && map.contains_key(EXECUTION_ID_KEY);
    }

    payloads
        .iter()
        .all(|payload| payload.is_object() || payload.is_null())
}
