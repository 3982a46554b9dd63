// webhook-relay-core/src/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::RelayError;

/// Queue the relay publishes to when nothing else is configured.
pub const DEFAULT_ROUTING_KEY: &str = "viber_incoming";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Inbound webhook body: an object with arbitrary JSON values.
///
/// No schema is enforced. The payload is decoded once per request,
/// re-encoded once and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackPayload(Map<String, Value>);

impl CallbackPayload {
    /// Decodes a JSON object. Anything else (malformed input, an empty body,
    /// an array or a scalar) is a [`RelayError::Decode`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RelayError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| RelayError::Decode(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(RelayError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Canonical re-encoding. Keys come out sorted.
    pub fn to_vec(&self) -> Result<Vec<u8>, RelayError> {
        serde_json::to_vec(&self.0).map_err(|e| RelayError::Serialization(e.to_string()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for CallbackPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// AMQP delivery mode. Transient messages may live only in broker memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMode {
    Transient = 1,
    Persistent = 2,
}

impl DeliveryMode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Outbound message envelope: encoded body plus broker metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub id: Uuid,
    pub body: Vec<u8>,
    pub content_type: String,
    pub delivery_mode: DeliveryMode,
    pub created_at: DateTime<Utc>,
}

impl QueueMessage {
    /// Transient `application/json` message stamped with the current time.
    pub fn json(body: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            body,
            content_type: JSON_CONTENT_TYPE.to_string(),
            delivery_mode: DeliveryMode::Transient,
            created_at: Utc::now(),
        }
    }
}
