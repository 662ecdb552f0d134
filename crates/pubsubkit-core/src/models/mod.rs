//! Typed PubSub messages.
//!
//! Each variant is built once from one envelope's `data` mapping and keeps
//! that mapping in `raw` for fields that are not promoted to typed attributes.

pub mod bits;
pub mod channel_points;
pub mod chat;
pub mod moderation;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{PubSubError, Result};
use crate::refs::PartialUser;
use crate::topic::TopicKey;

pub use bits::{BitsBadgeMessage, BitsMessage};
pub use channel_points::ChannelPointsMessage;
pub use chat::{BadgeEntitlement, ChatMessage};
pub use moderation::ModerationActionMessage;

/// Any message the dispatcher can produce.
#[derive(Debug, Clone)]
pub enum Message {
    Bits(BitsMessage),
    BitsBadge(BitsBadgeMessage),
    ChannelPoints(ChannelPointsMessage),
    Moderation(ModerationActionMessage),
}

impl Message {
    /// Originating topic key; `None` for channel points.
    pub fn topic(&self) -> Option<TopicKey> {
        match self {
            Message::Bits(m) => m.topic,
            Message::BitsBadge(m) => m.topic,
            Message::ChannelPoints(m) => m.topic,
            Message::Moderation(m) => m.topic,
        }
    }

    /// Source `data` mapping.
    pub fn raw(&self) -> &Map<String, Value> {
        match self {
            Message::Bits(m) => &m.raw,
            Message::BitsBadge(m) => &m.raw,
            Message::ChannelPoints(m) => &m.raw,
            Message::Moderation(m) => &m.raw,
        }
    }

    /// Every user reference carried by the message, acting user first.
    pub fn users(&self) -> Vec<&PartialUser> {
        match self {
            Message::Bits(m) => m.user.iter().collect(),
            Message::BitsBadge(m) => vec![&m.user],
            Message::ChannelPoints(m) => vec![&m.user, &m.reward.channel],
            Message::Moderation(m) => std::iter::once(&m.created_by)
                .chain(m.target.iter())
                .collect(),
        }
    }
}

/// Decode a wire struct from a payload mapping.
fn decode<T: DeserializeOwned>(what: &str, data: &Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(data.clone()))
        .map_err(|e| PubSubError::MalformedPayload(format!("{what}: {e}")))
}
