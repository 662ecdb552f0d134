//! Shared application state for the pubsubkit client.
//!
//! Wires the client handle, event router, and metrics, and registers the
//! built-in handlers. Startup errors are returned, not panicked.

use std::sync::Arc;

use pubsubkit_core::error::Result;

use crate::client::PubSubClient;
use crate::config::ClientConfig;
use crate::dispatch::EventRouter;
use crate::obs::metrics::IngestMetrics;
use crate::services::LogHandler;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    client: Arc<PubSubClient>,
    router: Arc<EventRouter>,
}

struct AppStateInner {
    cfg: ClientConfig,
    metrics: IngestMetrics,
}

impl AppState {
    /// Build state with the built-in `LogHandler` on every event.
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let state = Self::bare(cfg)?;
        state.router.register_all(Arc::new(LogHandler::new()));
        Ok(state)
    }

    /// Build state without registering any handler.
    pub fn bare(cfg: ClientConfig) -> Result<Self> {
        cfg.validate()?;

        let client = Arc::new(PubSubClient::from_config(&cfg.client));
        tracing::info!(
            channels = client.channel_count(),
            users = client.directory().len(),
            "client seeded"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                metrics: IngestMetrics::default(),
            }),
            client,
            router: Arc::new(EventRouter::new()),
        })
    }

    pub fn cfg(&self) -> &ClientConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &IngestMetrics {
        &self.inner.metrics
    }

    pub fn client(&self) -> Arc<PubSubClient> {
        Arc::clone(&self.client)
    }

    pub fn router(&self) -> Arc<EventRouter> {
        Arc::clone(&self.router)
    }
}
