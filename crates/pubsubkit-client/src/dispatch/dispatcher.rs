use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use pubsubkit_core::error::{PubSubError, Result};
use pubsubkit_core::models::Message;
use pubsubkit_core::topic::EventName;

/// Consumer of dispatched messages.
#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle(&self, event: EventName, msg: Arc<Message>) -> Result<()>;
}

/// Registry of handlers keyed by event name.
#[derive(Default)]
pub struct EventRouter {
    handlers: DashMap<EventName, Vec<Arc<dyn EventHandler>>>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    pub fn register(&self, event: EventName, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(event).or_default().push(handler);
    }

    /// Register one handler for every event name.
    pub fn register_all(&self, handler: Arc<dyn EventHandler>) {
        for event in EventName::ALL {
            self.register(event, Arc::clone(&handler));
        }
    }

    pub fn handler_count(&self, event: EventName) -> usize {
        self.handlers.get(&event).map_or(0, |h| h.len())
    }

    /// Deliver to every handler of `event`, in registration order.
    ///
    /// All handlers run even if one fails; the first failure is returned.
    pub async fn dispatch(&self, event: EventName, msg: Message) -> Result<usize> {
        // clone out so no map guard is held across an await
        let handlers = self
            .handlers
            .get(&event)
            .map(|h| h.value().clone())
            .unwrap_or_default();

        if handlers.is_empty() {
            tracing::debug!(event = %event, "no handler registered");
            return Ok(0);
        }

        let msg = Arc::new(msg);
        let mut first_err: Option<PubSubError> = None;
        for h in &handlers {
            if let Err(e) = h.handle(event, Arc::clone(&msg)).await {
                tracing::warn!(event = %event, handler = h.name(), error = %e, "handler failed");
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(handlers.len()),
        }
    }
}
