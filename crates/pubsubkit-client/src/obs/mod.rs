//! Lightweight in-process counters.
//!
//! Counts dispatched events and rejected envelopes. Rendered in Prometheus
//! text format and logged when ingest finishes.

pub mod metrics;
