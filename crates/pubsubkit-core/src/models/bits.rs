//! Bits cheer and bits badge unlock messages.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::chat::{BadgeEntitlement, ChatMessage};
use crate::models::decode;
use crate::protocol::wire::{self, WireId};
use crate::refs::{Channel, ClientHandle, PartialUser};
use crate::topic::TopicKey;

#[derive(Debug, Deserialize)]
struct BitsWire {
    chat_message: String,
    message_id: WireId,
    message_type: String,
    #[serde(deserialize_with = "wire::deserialize_falsy")]
    badge_entitlement: Option<BadgeEntitlement>,
    bits_used: u64,
    channel_id: WireId,
    #[serde(deserialize_with = "wire::deserialize_nullable")]
    user_id: Option<WireId>,
    #[serde(deserialize_with = "wire::deserialize_nullable")]
    user_name: Option<String>,
    version: String,
}

/// `channel-bits-events-v2`: a user cheered bits in a channel.
#[derive(Debug, Clone)]
pub struct BitsMessage {
    pub topic: Option<TopicKey>,
    pub message: ChatMessage,
    pub badge_entitlement: Option<BadgeEntitlement>,
    pub bits_used: u64,
    pub channel_id: u64,
    /// `None` for anonymous cheers.
    pub user: Option<PartialUser>,
    pub version: String,
    pub raw: Map<String, Value>,
}

impl BitsMessage {
    pub fn from_data<C>(client: &C, topic: TopicKey, data: &Map<String, Value>) -> Result<Self>
    where
        C: ClientHandle + ?Sized,
    {
        let w: BitsWire = decode("bits", data)?;
        let user = w
            .user_id
            .map(|id| PartialUser::new(client.repository(), id.0, w.user_name));

        Ok(Self {
            topic: Some(topic),
            message: ChatMessage::new(w.chat_message, w.message_id.0, w.message_type),
            badge_entitlement: w.badge_entitlement,
            bits_used: w.bits_used,
            channel_id: w.channel_id.0,
            user,
            version: w.version,
            raw: data.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct BitsBadgeWire {
    user_id: WireId,
    user_name: String,
    channel_name: String,
    badge_tier: u64,
    chat_message: String,
    #[serde(deserialize_with = "wire::deserialize_timestamp")]
    time: NaiveDateTime,
}

/// `channel-bits-badge-unlocks`: a user reached a new bits badge tier.
#[derive(Debug, Clone)]
pub struct BitsBadgeMessage {
    pub topic: Option<TopicKey>,
    pub user: PartialUser,
    pub channel: Channel,
    pub badge_tier: u64,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub raw: Map<String, Value>,
}

impl BitsBadgeMessage {
    /// Reuses the client's cached channel when it has one.
    pub fn from_data<C>(client: &C, topic: TopicKey, data: &Map<String, Value>) -> Result<Self>
    where
        C: ClientHandle + ?Sized,
    {
        let w: BitsBadgeWire = decode("bits badge", data)?;

        Ok(Self {
            topic: Some(topic),
            user: PartialUser::new(client.repository(), w.user_id.0, Some(w.user_name)),
            channel: client.channel_or_new(&w.channel_name),
            badge_tier: w.badge_tier,
            message: w.chat_message,
            timestamp: w.time,
            raw: data.clone(),
        })
    }
}
