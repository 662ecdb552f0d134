//! Label-keyed counters backed by `DashMap`. Labels are flattened into sorted
//! key vectors to keep deterministic ordering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

#[derive(Default)]
pub struct IngestMetrics {
    /// Labels: `event`.
    pub events_dispatched: CounterVec,
    /// Labels: `code`.
    pub envelopes_rejected: CounterVec,
    /// Labels: `event`.
    pub handler_errors: CounterVec,
}

impl IngestMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.events_dispatched
            .render("pubsubkit_events_dispatched_total", &mut out);
        self.envelopes_rejected
            .render("pubsubkit_envelopes_rejected_total", &mut out);
        self.handler_errors
            .render("pubsubkit_handler_errors_total", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_order_insensitive() {
        let c = CounterVec::default();
        c.inc(&[("a", "1"), ("b", "2")]);
        c.add(&[("b", "2"), ("a", "1")], 2);
        assert_eq!(c.get(&[("a", "1"), ("b", "2")]), 3);
        assert_eq!(c.get(&[("a", "1")]), 0);
    }

    #[test]
    fn render_is_prometheus_text() {
        let m = IngestMetrics::default();
        m.events_dispatched.inc(&[("event", "pubsub_bits")]);
        m.envelopes_rejected.inc(&[("code", "UNRECOGNIZED_TOPIC")]);
        let out = m.render();
        assert!(out.contains("pubsubkit_events_dispatched_total{event=\"pubsub_bits\"} 1"));
        assert!(out.contains("pubsubkit_envelopes_rejected_total{code=\"UNRECOGNIZED_TOPIC\"} 1"));
        assert!(out.contains("# TYPE pubsubkit_handler_errors_total counter"));
    }
}
