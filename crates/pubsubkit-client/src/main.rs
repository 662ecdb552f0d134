//! pubsubkit client
//!
//! - Reads NDJSON PubSub envelopes from a file or stdin
//! - Builds typed messages and routes them to registered handlers
//! - Logs a summary and the counters at exit

use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use pubsubkit_client::{app_state, config, transport::ingest};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pubsub.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let state = app_state::AppState::new(cfg).expect("state init failed");

    let source = state.cfg().ingest.path.clone();
    tracing::info!(%source, "pubsubkit-client starting");

    let res = if source == "-" {
        ingest::run(&state, BufReader::new(tokio::io::stdin())).await
    } else {
        let file = tokio::fs::File::open(&source)
            .await
            .expect("failed to open ingest.path");
        ingest::run(&state, BufReader::new(file)).await
    };

    match res {
        Ok(report) => tracing::info!(
            envelopes = report.envelopes,
            dispatched = report.dispatched,
            rejected = report.rejected,
            users_known = state.client().directory().len(),
            "ingest finished"
        ),
        Err(e) => tracing::error!(code = e.kind().as_str(), error = %e, "ingest stopped"),
    }
    tracing::debug!(metrics = %state.metrics().render(), "counters");
}
