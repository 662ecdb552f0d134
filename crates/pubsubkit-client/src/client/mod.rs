//! Concrete client handle: channel cache + user directory.

pub mod directory;

use std::sync::Arc;

use dashmap::DashMap;

use pubsubkit_core::models::Message;
use pubsubkit_core::refs::{Channel, ClientHandle, RepoHandle, UserProfile};

use crate::config::ClientSection;

pub use directory::UserDirectory;

#[derive(Debug, Default)]
pub struct PubSubClient {
    channels: DashMap<String, Channel>,
    directory: Arc<UserDirectory>,
}

impl PubSubClient {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
            directory: Arc::new(UserDirectory::new()),
        }
    }

    /// Seed channels and users from config.
    pub fn from_config(section: &ClientSection) -> Self {
        let client = Self::new();
        for name in &section.channels {
            client.join_channel(name);
        }
        for u in &section.users {
            client.directory.insert(UserProfile {
                id: u.id,
                login: Some(u.login.clone()),
                display_name: u.display_name.clone(),
            });
        }
        client
    }

    /// Cache a channel; returns the cached reference.
    pub fn join_channel(&self, name: &str) -> Channel {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name))
            .value()
            .clone()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn directory(&self) -> Arc<UserDirectory> {
        Arc::clone(&self.directory)
    }

    /// Record every named user a message carries. Returns how many were new.
    pub fn observe(&self, msg: &Message) -> usize {
        msg.users()
            .into_iter()
            .filter_map(|u| u.name.as_deref().map(|name| (u.id, name)))
            .filter(|(id, name)| self.directory.record(*id, name))
            .count()
    }
}

impl ClientHandle for PubSubClient {
    fn get_channel(&self, name: &str) -> Option<Channel> {
        self.channels.get(name).map(|c| c.value().clone())
    }

    fn repository(&self) -> RepoHandle {
        self.directory.clone()
    }
}
