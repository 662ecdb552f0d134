//! Topic dispatcher: envelope -> (event name, typed message).
//!
//! Pure and synchronous. Nothing is logged here; callers decide what to do
//! with a failed envelope.

use serde_json::{Map, Value};

use crate::error::{PubSubError, Result};
use crate::models::{
    BitsBadgeMessage, BitsMessage, ChannelPointsMessage, Message, ModerationActionMessage,
};
use crate::protocol::envelope::Envelope;
use crate::refs::ClientHandle;
use crate::topic::{self, Constructor, EventName, TopicKey};

/// Build the message for one of the [`topic::TOPIC_TABLE`] topics.
///
/// Fails with `UnrecognizedTopic` for keys outside the table and with
/// `NotImplemented` for mapped topics that have no model (subscriptions,
/// whispers). No message is constructed in either case.
pub fn create_message<C>(client: &C, envelope: &Envelope) -> Result<(EventName, Message)>
where
    C: ClientHandle + ?Sized,
{
    let key = envelope.topic_key()?;
    let route = topic::lookup(key)?;
    let data = &envelope.data;

    let message = match route.constructor {
        Constructor::Bits => Message::Bits(BitsMessage::from_data(client, key, data)?),
        Constructor::BitsBadge => {
            Message::BitsBadge(BitsBadgeMessage::from_data(client, key, data)?)
        }
        Constructor::Moderation => {
            Message::Moderation(ModerationActionMessage::from_data(client, key, data)?)
        }
        Constructor::Unimplemented => return Err(PubSubError::NotImplemented(route.event)),
    };

    Ok((route.event, message))
}

/// Build a reward redemption message from its payload mapping.
pub fn create_channel_points_message<C>(client: &C, data: &Map<String, Value>) -> Result<Message>
where
    C: ClientHandle + ?Sized,
{
    ChannelPointsMessage::from_data(client, data).map(Message::ChannelPoints)
}

/// Entry point for every inbound envelope.
///
/// Redemptions go through [`create_channel_points_message`]; every other
/// topic goes through [`create_message`].
pub fn route_envelope<C>(client: &C, envelope: &Envelope) -> Result<(EventName, Message)>
where
    C: ClientHandle + ?Sized,
{
    match envelope.topic_key()? {
        TopicKey::ChannelPoints => {
            let message = create_channel_points_message(client, &envelope.data)?;
            Ok((EventName::ChannelPoints, message))
        }
        _ => create_message(client, envelope),
    }
}
