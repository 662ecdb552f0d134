//! Ingest loop: read envelope lines, build messages, route them to handlers.

use tokio::io::AsyncBufRead;

use pubsubkit_core::error::{PubSubError, Result};
use pubsubkit_core::protocol::envelope::Envelope;
use pubsubkit_core::route_envelope;

use crate::app_state::AppState;
use crate::transport::codec::{decode_line, read_frame, Frame};

/// Totals for one ingest run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Non-blank lines read.
    pub envelopes: u64,
    pub dispatched: u64,
    pub rejected: u64,
}

/// Read until EOF. Rejected envelopes are logged and skipped unless
/// `ingest.fail_fast` is set, in which case the first one is returned.
///
/// At most `ingest.max_line_bytes` of a line is buffered; longer lines are
/// rejected as `PayloadTooLarge` and skipped.
pub async fn run<R>(app: &AppState, mut reader: R) -> Result<IngestReport>
where
    R: AsyncBufRead + Unpin,
{
    let max_bytes = app.cfg().ingest.max_line_bytes;
    let fail_fast = app.cfg().ingest.fail_fast;
    let mut report = IngestReport::default();
    let mut buf = Vec::with_capacity(max_bytes.min(64 * 1024));
    let mut line_no: u64 = 0;

    while let Some(frame) = read_frame(&mut reader, &mut buf, max_bytes)
        .await
        .map_err(|e| PubSubError::Internal(format!("read failed: {e}")))?
    {
        line_no += 1;

        let decoded = match frame {
            Frame::Line(line) => decode_line(&line, max_bytes),
            Frame::TooLong => Err(PubSubError::PayloadTooLarge),
            Frame::NotUtf8 => Err(PubSubError::MalformedPayload(
                "line is not valid UTF-8".into(),
            )),
        };

        let res = match decoded {
            Ok(None) => continue,
            Ok(Some(env)) => {
                report.envelopes += 1;
                handle_envelope(app, &env).await
            }
            Err(e) => {
                report.envelopes += 1;
                Err(e)
            }
        };

        match res {
            Ok(()) => report.dispatched += 1,
            Err(e) => {
                report.rejected += 1;
                app.metrics()
                    .envelopes_rejected
                    .inc(&[("code", e.kind().as_str())]);
                tracing::warn!(line = line_no, code = e.kind().as_str(), error = %e, "envelope rejected");
                if fail_fast {
                    return Err(e);
                }
            }
        }
    }

    Ok(report)
}

/// Handler failures are logged by the router and counted here; they do not
/// reject the envelope.
async fn handle_envelope(app: &AppState, env: &Envelope) -> Result<()> {
    let client = app.client();
    let (event, msg) = route_envelope(client.as_ref(), env)?;

    let new_users = client.observe(&msg);
    tracing::debug!(event = %event, topic = env.topic().unwrap_or_default(), new_users, "message built");

    app.metrics()
        .events_dispatched
        .inc(&[("event", event.as_str())]);

    if app.router().dispatch(event, msg).await.is_err() {
        app.metrics()
            .handler_errors
            .inc(&[("event", event.as_str())]);
    }
    Ok(())
}
