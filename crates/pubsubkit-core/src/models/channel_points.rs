//! Channel points reward redemptions.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::decode;
use crate::protocol::wire::{self, WireId};
use crate::refs::{ClientHandle, CustomReward, PartialUser};
use crate::topic::TopicKey;

#[derive(Debug, Deserialize)]
struct ChannelPointsWire {
    redemption: RedemptionWire,
    user: RedeemerWire,
}

#[derive(Debug, Deserialize)]
struct RedemptionWire {
    #[serde(deserialize_with = "wire::deserialize_timestamp")]
    redeemed_at: NaiveDateTime,
    channel_id: WireId,
    id: String,
    reward: Value,
    #[serde(deserialize_with = "wire::deserialize_nullable")]
    user_input: Option<String>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RedeemerWire {
    id: WireId,
    display_name: String,
}

/// A user exchanged channel points for a reward.
#[derive(Debug, Clone)]
pub struct ChannelPointsMessage {
    /// Always `None`: redemptions arrive through their own entry path.
    pub topic: Option<TopicKey>,
    pub timestamp: NaiveDateTime,
    pub channel_id: u64,
    /// Redemption id.
    pub id: String,
    pub user: PartialUser,
    pub reward: CustomReward,
    /// Free text entered by the user, for rewards that ask for it.
    pub input: Option<String>,
    /// e.g. `UNFULFILLED`, `FULFILLED`.
    pub status: String,
    pub raw: Map<String, Value>,
}

impl ChannelPointsMessage {
    pub fn from_data<C>(client: &C, data: &Map<String, Value>) -> Result<Self>
    where
        C: ClientHandle + ?Sized,
    {
        let w: ChannelPointsWire = decode("channel points", data)?;
        let r = w.redemption;
        let repo = client.repository();
        let owner = PartialUser::new(repo.clone(), r.channel_id.0, None);

        Ok(Self {
            topic: None,
            timestamp: r.redeemed_at,
            channel_id: r.channel_id.0,
            id: r.id,
            user: PartialUser::new(repo, w.user.id.0, Some(w.user.display_name)),
            reward: CustomReward::from_wire(&r.reward, owner)?,
            input: r.user_input,
            status: r.status,
            raw: data.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::ErrorKind;
    use crate::refs::test_support::StubClient;
    use serde_json::json;

    fn redemption() -> Value {
        json!({
            "redemption": {
                "id": "f9b9d5a8-0c4e-4c1b-9f2f-2f6c1a1f0b11",
                "channel_id": "30515034",
                "redeemed_at": "2019-11-12T01:29:34Z",
                "reward": {
                    "id": "6ef17bb2-e5ae-432e-8b3f-5ac4dd774668",
                    "channel_id": "30515034",
                    "title": "hit a gleesh walk on stream",
                    "prompt": "cleanside's finest",
                    "cost": 10,
                    "is_user_input_required": true,
                    "is_enabled": true,
                    "is_paused": false,
                    "is_in_stock": true
                },
                "user_input": "yeooo",
                "status": "FULFILLED"
            },
            "user": { "id": "30515034", "display_name": "0xlord" }
        })
    }

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn redemption_promotes_fields() {
        let client = StubClient::new(&[]);
        let m = ChannelPointsMessage::from_data(&client, &map(redemption())).unwrap();

        assert!(m.topic.is_none());
        assert_eq!(m.channel_id, 30515034);
        assert_eq!(m.id, "f9b9d5a8-0c4e-4c1b-9f2f-2f6c1a1f0b11");
        assert_eq!(m.user.name.as_deref(), Some("0xlord"));
        assert_eq!(m.reward.title, "hit a gleesh walk on stream");
        assert!(m.reward.input_required);
        assert_eq!(m.reward.channel.id, 30515034);
        assert!(m.reward.channel.name.is_none());
        assert_eq!(m.input.as_deref(), Some("yeooo"));
        assert_eq!(m.status, "FULFILLED");
    }

    #[test]
    fn null_user_input_is_none() {
        let mut v = redemption();
        v["redemption"]["user_input"] = Value::Null;
        let client = StubClient::new(&[]);
        let m = ChannelPointsMessage::from_data(&client, &map(v)).unwrap();
        assert!(m.input.is_none());
    }

    #[test]
    fn missing_user_input_is_malformed() {
        let mut v = redemption();
        v["redemption"].as_object_mut().unwrap().remove("user_input");
        let client = StubClient::new(&[]);
        let err = ChannelPointsMessage::from_data(&client, &map(v)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn missing_user_is_malformed() {
        let mut v = redemption();
        v.as_object_mut().unwrap().remove("user");
        let client = StubClient::new(&[]);
        let err = ChannelPointsMessage::from_data(&client, &map(v)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }
}
