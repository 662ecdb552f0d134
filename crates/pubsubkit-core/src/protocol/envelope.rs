//! Inbound envelope (JSON).
//!
//! The transport decodes each frame into an object whose `data` mapping holds
//! the topic string and the event payload side by side.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{PubSubError, Result};
use crate::topic::TopicKey;

/// Decoded PubSub envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Topic (`data.topic`) plus payload fields.
    pub data: Map<String, Value>,
}

impl Envelope {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Parse an envelope from JSON text.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| PubSubError::MalformedPayload(format!("invalid envelope json: {e}")))
    }

    /// Full topic string, e.g. `channel-bits-events-v2.123`.
    pub fn topic(&self) -> Result<&str> {
        match self.data.get("topic") {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(PubSubError::MalformedPayload(
                "data.topic must be a string".into(),
            )),
            None => Err(PubSubError::MalformedPayload("missing data.topic".into())),
        }
    }

    /// Topic key derived from `data.topic`.
    pub fn topic_key(&self) -> Result<TopicKey> {
        TopicKey::from_topic(self.topic()?)
    }
}
