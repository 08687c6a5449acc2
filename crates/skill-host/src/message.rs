//! Bus message type

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object used for message data, context, and dialog variables
pub type DataMap = Map<String, Value>;

/// A message travelling on the host bus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message type, e.g. `neon.linear_led.show_animation`
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Payload
    #[serde(default)]
    pub data: DataMap,
    /// Routing context (client, source, response flags)
    #[serde(default)]
    pub context: DataMap,
}

impl Message {
    /// Create a message with the given payload. Non-object payloads become empty data.
    pub fn new(msg_type: impl Into<String>, data: Value) -> Self {
        Self {
            msg_type: msg_type.into(),
            data: into_map(data),
            context: DataMap::new(),
        }
    }

    /// Create an `intent_failure`-style message carrying a single utterance
    pub fn utterance(msg_type: impl Into<String>, utterance: &str) -> Self {
        Self::new(msg_type, serde_json::json!({ "utterance": utterance }))
    }

    /// Builder-style context insertion
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// New message of another type that keeps this message's context
    pub fn forward(&self, msg_type: impl Into<String>, data: Value) -> Self {
        Self {
            msg_type: msg_type.into(),
            data: into_map(data),
            context: self.context.clone(),
        }
    }

    /// The `utterance` data field, if present and a string
    pub fn utterance_text(&self) -> Option<&str> {
        self.data.get("utterance").and_then(Value::as_str)
    }

    /// A boolean context flag; missing or non-boolean values read as `false`
    pub fn context_flag(&self, key: &str) -> bool {
        self.context.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// A string context value
    pub fn context_str(&self, key: &str) -> Option<&str> {
        self.context.get(key).and_then(Value::as_str)
    }
}

fn into_map(value: Value) -> DataMap {
    match value {
        Value::Object(map) => map,
        _ => DataMap::new(),
    }
}
