//! In-memory user directory backing `PartialUser::fetch`.

use dashmap::DashMap;

use pubsubkit_core::error::Result;
use pubsubkit_core::refs::{Repository, UserProfile};

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: DashMap<u64, UserProfile>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Insert or replace a full profile.
    pub fn insert(&self, profile: UserProfile) {
        self.users.insert(profile.id, profile);
    }

    /// Record a user seen on the wire. Existing profiles are kept.
    ///
    /// Wire names are display names; the login stays unknown.
    pub fn record(&self, id: u64, name: &str) -> bool {
        if self.users.contains_key(&id) {
            return false;
        }
        self.users.insert(
            id,
            UserProfile {
                id,
                login: None,
                display_name: Some(name.to_string()),
            },
        );
        true
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Repository for UserDirectory {
    fn fetch_user(&self, id: u64) -> Result<Option<UserProfile>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }
}
