//! Lightweight references to users, channels, and rewards.
//!
//! A reference is an identifier plus a [`RepoHandle`]. Nothing is fetched at
//! construction; richer data is resolved on demand through the repository.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{PubSubError, Result};

/// Full user record resolved through a [`Repository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: u64,
    /// Known only for users seeded from configuration.
    pub login: Option<String>,
    pub display_name: Option<String>,
}

/// Backing store used to resolve references lazily.
pub trait Repository: Send + Sync + fmt::Debug {
    /// `Ok(None)` when the user is unknown to the repository.
    fn fetch_user(&self, id: u64) -> Result<Option<UserProfile>>;
}

pub type RepoHandle = Arc<dyn Repository>;

/// What the dispatcher needs from the surrounding client.
pub trait ClientHandle {
    /// Cached channel with this name, if the client has one.
    fn get_channel(&self, name: &str) -> Option<Channel>;

    /// Repository passed into every reference the dispatcher builds.
    fn repository(&self) -> RepoHandle;

    /// Cached channel, or a fresh reference by name.
    fn channel_or_new(&self, name: &str) -> Channel {
        self.get_channel(name).unwrap_or_else(|| Channel::new(name))
    }
}

#[derive(Clone)]
pub struct PartialUser {
    pub id: u64,
    pub name: Option<String>,
    repo: RepoHandle,
}

impl PartialUser {
    pub fn new(repo: RepoHandle, id: u64, name: Option<String>) -> Self {
        Self { id, name, repo }
    }

    /// Resolve the full profile through the repository.
    pub fn fetch(&self) -> Result<Option<UserProfile>> {
        self.repo.fetch_user(self.id)
    }
}

impl fmt::Debug for PartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialUser")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for PartialUser {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Deserialize)]
struct RewardWire {
    id: String,
    title: String,
    cost: u64,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    is_enabled: bool,
    #[serde(default)]
    is_paused: bool,
    #[serde(default)]
    is_in_stock: bool,
    #[serde(default)]
    is_user_input_required: bool,
    #[serde(default)]
    should_redemptions_skip_request_queue: bool,
    #[serde(default)]
    max_per_stream: Option<MaxPerStreamWire>,
    #[serde(default)]
    global_cooldown: Option<CooldownWire>,
}

#[derive(Debug, Deserialize)]
struct MaxPerStreamWire {
    is_enabled: bool,
    max_per_stream: u64,
}

#[derive(Debug, Deserialize)]
struct CooldownWire {
    is_enabled: bool,
    global_cooldown_seconds: u64,
}

/// Channel-points reward, rebuilt from a redemption payload.
#[derive(Debug, Clone)]
pub struct CustomReward {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub cost: u64,
    pub background_color: Option<String>,
    pub enabled: bool,
    pub paused: bool,
    pub in_stock: bool,
    pub input_required: bool,
    pub skip_queue: bool,
    /// Redemption cap per stream, when enabled.
    pub max_per_stream: Option<u64>,
    /// Global cooldown in seconds, when enabled.
    pub cooldown_seconds: Option<u64>,
    /// Channel owner.
    pub channel: PartialUser,
    pub raw: Value,
}

impl CustomReward {
    pub fn from_wire(reward: &Value, channel: PartialUser) -> Result<Self> {
        let w: RewardWire = serde_json::from_value(reward.clone())
            .map_err(|e| PubSubError::MalformedPayload(format!("reward: {e}")))?;

        Ok(Self {
            id: w.id,
            title: w.title,
            prompt: w.prompt,
            cost: w.cost,
            background_color: w.background_color,
            enabled: w.is_enabled,
            paused: w.is_paused,
            in_stock: w.is_in_stock,
            input_required: w.is_user_input_required,
            skip_queue: w.should_redemptions_skip_request_queue,
            max_per_stream: w
                .max_per_stream
                .filter(|m| m.is_enabled)
                .map(|m| m.max_per_stream),
            cooldown_seconds: w
                .global_cooldown
                .filter(|c| c.is_enabled)
                .map(|c| c.global_cooldown_seconds),
            channel,
            raw: reward.clone(),
        })
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::test_support::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn reward_reads_limits_only_when_enabled() {
        let repo: RepoHandle = Arc::new(EmptyRepo);
        let owner = PartialUser::new(Arc::clone(&repo), 42, None);
        let reward = CustomReward::from_wire(
            &json!({
                "id": "r-1",
                "title": "Hydrate",
                "cost": 500,
                "is_enabled": true,
                "max_per_stream": { "is_enabled": true, "max_per_stream": 3 },
                "global_cooldown": { "is_enabled": false, "global_cooldown_seconds": 60 }
            }),
            owner.clone(),
        )
        .unwrap();

        assert_eq!(reward.cost, 500);
        assert!(reward.enabled);
        assert_eq!(reward.max_per_stream, Some(3));
        assert_eq!(reward.cooldown_seconds, None);
        assert_eq!(reward.prompt, "");
        assert_eq!(reward.channel, owner);
    }

    #[test]
    fn reward_without_title_is_malformed() {
        let repo: RepoHandle = Arc::new(EmptyRepo);
        let owner = PartialUser::new(repo, 1, None);
        let err = CustomReward::from_wire(&json!({ "id": "r", "cost": 1 }), owner).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::MalformedPayload);
    }

    #[test]
    fn channel_or_new_prefers_cache() {
        let client = StubClient::new(&["cached"]);
        assert_eq!(client.channel_or_new("cached").name, "cached");
        assert!(client.get_channel("fresh").is_none());
        assert_eq!(client.channel_or_new("fresh").name, "fresh");
    }
}
