//! Moderator actions (`chat_moderator_actions`).

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::decode;
use crate::protocol::wire::{self, WireId};
use crate::refs::{ClientHandle, PartialUser};
use crate::topic::TopicKey;

#[derive(Debug, Deserialize)]
struct ModerationWire {
    message: ModerationBody,
}

#[derive(Debug, Deserialize)]
struct ModerationBody {
    data: ModerationData,
}

#[derive(Debug, Deserialize)]
struct ModerationData {
    moderation_action: String,
    #[serde(deserialize_with = "wire::deserialize_null_as_empty")]
    args: Vec<String>,
    created_by_user_id: WireId,
    created_by: String,
    msg_id: String,
    #[serde(default, deserialize_with = "wire::deserialize_falsy")]
    target_user_id: Option<WireId>,
    #[serde(deserialize_with = "wire::deserialize_nullable")]
    target_user_login: Option<String>,
    from_automod: bool,
}

/// Ban, timeout, delete and similar moderator actions.
#[derive(Debug, Clone)]
pub struct ModerationActionMessage {
    pub topic: Option<TopicKey>,
    pub action: String,
    pub args: Vec<String>,
    pub created_by: PartialUser,
    pub message_id: String,
    pub target: Option<PartialUser>,
    pub from_automod: bool,
    pub raw: Map<String, Value>,
}

impl ModerationActionMessage {
    pub fn from_data<C>(client: &C, topic: TopicKey, data: &Map<String, Value>) -> Result<Self>
    where
        C: ClientHandle + ?Sized,
    {
        let d = decode::<ModerationWire>("moderation", data)?.message.data;
        let repo = client.repository();
        let target = d
            .target_user_id
            .map(|id| PartialUser::new(repo.clone(), id.0, d.target_user_login));

        Ok(Self {
            topic: Some(topic),
            action: d.moderation_action,
            args: d.args,
            created_by: PartialUser::new(repo, d.created_by_user_id.0, Some(d.created_by)),
            message_id: d.msg_id,
            target,
            from_automod: d.from_automod,
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

    fn action(target_user_id: Value) -> Map<String, Value> {
        let v = json!({
            "topic": "chat_moderator_actions.456.789",
            "message": {
                "type": "moderation_action",
                "data": {
                    "type": "chat_login_moderation",
                    "moderation_action": "timeout",
                    "args": ["spammer", "600", "links"],
                    "created_by": "a_mod",
                    "created_by_user_id": "1001",
                    "msg_id": "",
                    "target_user_id": target_user_id,
                    "target_user_login": "spammer",
                    "from_automod": false
                }
            }
        });
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn timeout_with_target() {
        let client = StubClient::new(&[]);
        let m = ModerationActionMessage::from_data(
            &client,
            TopicKey::ModeratorActions,
            &action(json!("2002")),
        )
        .unwrap();

        assert_eq!(m.action, "timeout");
        assert_eq!(m.args, vec!["spammer", "600", "links"]);
        assert_eq!(m.created_by.id, 1001);
        assert_eq!(m.created_by.name.as_deref(), Some("a_mod"));
        let target = m.target.unwrap();
        assert_eq!((target.id, target.name.as_deref()), (2002, Some("spammer")));
        assert!(!m.from_automod);
    }

    #[test]
    fn empty_or_null_target_is_none() {
        let client = StubClient::new(&[]);
        for t in [json!(""), json!(null)] {
            let m =
                ModerationActionMessage::from_data(&client, TopicKey::ModeratorActions, &action(t))
                    .unwrap();
            assert!(m.target.is_none());
        }
    }

    #[test]
    fn absent_target_id_is_none() {
        let mut d = action(json!(""));
        d["message"]["data"]
            .as_object_mut()
            .unwrap()
            .remove("target_user_id");
        let client = StubClient::new(&[]);
        let m = ModerationActionMessage::from_data(&client, TopicKey::ModeratorActions, &d).unwrap();
        assert!(m.target.is_none());
    }

    #[test]
    fn missing_target_login_is_malformed() {
        let mut d = action(json!("2002"));
        d["message"]["data"]
            .as_object_mut()
            .unwrap()
            .remove("target_user_login");
        let client = StubClient::new(&[]);
        let err = ModerationActionMessage::from_data(&client, TopicKey::ModeratorActions, &d)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn null_args_are_empty() {
        let mut d = action(json!(""));
        d["message"]["data"]["args"] = Value::Null;
        let client = StubClient::new(&[]);
        let m = ModerationActionMessage::from_data(&client, TopicKey::ModeratorActions, &d).unwrap();
        assert!(m.args.is_empty());
    }

    #[test]
    fn missing_args_is_malformed() {
        let mut d = action(json!(""));
        d["message"]["data"].as_object_mut().unwrap().remove("args");
        let client = StubClient::new(&[]);
        let err = ModerationActionMessage::from_data(&client, TopicKey::ModeratorActions, &d)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn args_must_be_strings() {
        let mut d = action(json!(""));
        d["message"]["data"]["args"] = json!([1, 2]);
        let client = StubClient::new(&[]);
        let err = ModerationActionMessage::from_data(&client, TopicKey::ModeratorActions, &d)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }
}
