use std::sync::Arc;

use async_trait::async_trait;

use pubsubkit_core::error::Result;
use pubsubkit_core::models::Message;
use pubsubkit_core::topic::EventName;

use crate::dispatch::EventHandler;

/// Logs a one-line summary of every message it receives.
#[derive(Default)]
pub struct LogHandler;

impl LogHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LogHandler {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn handle(&self, event: EventName, msg: Arc<Message>) -> Result<()> {
        match msg.as_ref() {
            Message::Bits(m) => tracing::info!(
                event = %event,
                channel_id = m.channel_id,
                bits = m.bits_used,
                user = ?m.user.as_ref().and_then(|u| u.name.as_deref()),
                "bits"
            ),
            Message::BitsBadge(m) => tracing::info!(
                event = %event,
                channel = %m.channel.name,
                tier = m.badge_tier,
                user_id = m.user.id,
                "bits badge unlocked"
            ),
            Message::ChannelPoints(m) => tracing::info!(
                event = %event,
                channel_id = m.channel_id,
                reward = %m.reward.title,
                status = %m.status,
                "reward redeemed"
            ),
            Message::Moderation(m) => tracing::info!(
                event = %event,
                action = %m.action,
                by = m.created_by.id,
                target = ?m.target.as_ref().map(|t| t.id),
                automod = m.from_automod,
                "moderation action"
            ),
        }
        Ok(())
    }
}
