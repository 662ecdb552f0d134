//! Values embedded in bits messages.

use serde::Deserialize;

/// Chat line attached to a cheer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub content: String,
    pub id: u64,
    /// Wire `message_type`, e.g. `bits_event`.
    pub kind: String,
}

impl ChatMessage {
    pub fn new(content: impl Into<String>, id: u64, kind: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            id,
            kind: kind.into(),
        }
    }
}

/// Badge tier change unlocked by a cheer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BadgeEntitlement {
    #[serde(rename = "new_version")]
    pub new: u64,
    #[serde(rename = "old_version")]
    pub old: u64,
}
