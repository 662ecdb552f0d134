//! Topic keys, event names, and the static topic table.

use std::fmt;
use std::str::FromStr;

use crate::error::{PubSubError, Result};

/// Event category: the part of a topic before the first `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicKey {
    BitsEvents,
    BitsBadgeUnlocks,
    SubscribeEvents,
    ModeratorActions,
    Whispers,
    /// Reward redemptions; dispatched through the channel-points entry path.
    ChannelPoints,
}

impl TopicKey {
    pub const ALL: [TopicKey; 6] = [
        TopicKey::BitsEvents,
        TopicKey::BitsBadgeUnlocks,
        TopicKey::SubscribeEvents,
        TopicKey::ModeratorActions,
        TopicKey::Whispers,
        TopicKey::ChannelPoints,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TopicKey::BitsEvents => "channel-bits-events-v2",
            TopicKey::BitsBadgeUnlocks => "channel-bits-badge-unlocks",
            TopicKey::SubscribeEvents => "channel-subscribe-events-v1",
            TopicKey::ModeratorActions => "chat_moderator_actions",
            TopicKey::Whispers => "whispers",
            TopicKey::ChannelPoints => "channel-points-channel-v1",
        }
    }

    /// Derive the key from a full topic such as `chat_moderator_actions.1.2`.
    pub fn from_topic(topic: &str) -> Result<Self> {
        let key = topic.split_once('.').map_or(topic, |(key, _)| key);
        key.parse()
    }

    /// Event name this key is dispatched under.
    pub fn event_name(self) -> EventName {
        match self {
            TopicKey::BitsEvents => EventName::Bits,
            TopicKey::BitsBadgeUnlocks => EventName::BitsBadge,
            TopicKey::SubscribeEvents => EventName::Subscription,
            TopicKey::ModeratorActions => EventName::Moderation,
            TopicKey::Whispers => EventName::Whisper,
            TopicKey::ChannelPoints => EventName::ChannelPoints,
        }
    }
}

impl FromStr for TopicKey {
    type Err = PubSubError;

    fn from_str(s: &str) -> Result<Self> {
        TopicKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PubSubError::UnrecognizedTopic(s.to_string()))
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name handed to event consumers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    Bits,
    BitsBadge,
    Subscription,
    Moderation,
    Whisper,
    ChannelPoints,
}

impl EventName {
    pub const ALL: [EventName; 6] = [
        EventName::Bits,
        EventName::BitsBadge,
        EventName::Subscription,
        EventName::Moderation,
        EventName::Whisper,
        EventName::ChannelPoints,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventName::Bits => "pubsub_bits",
            EventName::BitsBadge => "pubsub_bits_badge",
            EventName::Subscription => "pubsub_subscription",
            EventName::Moderation => "pubsub_moderation",
            EventName::Whisper => "pubsub_whisper",
            EventName::ChannelPoints => "pubsub_channel_points",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which message model a topic is built into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructor {
    Bits,
    BitsBadge,
    Moderation,
    /// Mapped to an event name but not modeled.
    Unimplemented,
}

/// One row of [`TOPIC_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicRoute {
    pub key: TopicKey,
    pub event: EventName,
    pub constructor: Constructor,
}

/// Topics handled by `create_message`. Channel points are routed separately.
pub static TOPIC_TABLE: [TopicRoute; 5] = [
    TopicRoute {
        key: TopicKey::BitsEvents,
        event: EventName::Bits,
        constructor: Constructor::Bits,
    },
    TopicRoute {
        key: TopicKey::BitsBadgeUnlocks,
        event: EventName::BitsBadge,
        constructor: Constructor::BitsBadge,
    },
    TopicRoute {
        key: TopicKey::SubscribeEvents,
        event: EventName::Subscription,
        constructor: Constructor::Unimplemented,
    },
    TopicRoute {
        key: TopicKey::ModeratorActions,
        event: EventName::Moderation,
        constructor: Constructor::Moderation,
    },
    TopicRoute {
        key: TopicKey::Whispers,
        event: EventName::Whisper,
        constructor: Constructor::Unimplemented,
    },
];

/// Table lookup. Keys without a row are `UnrecognizedTopic`.
pub fn lookup(key: TopicKey) -> Result<&'static TopicRoute> {
    TOPIC_TABLE
        .iter()
        .find(|r| r.key == key)
        .ok_or_else(|| PubSubError::UnrecognizedTopic(key.as_str().to_string()))
}
