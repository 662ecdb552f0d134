//! Inbound side: NDJSON line decoding and the ingest loop.
//!
//! Transport plumbing (connections, LISTEN, heartbeats) lives outside this
//! crate; whatever produces decoded envelope lines can feed `ingest::run`.

pub mod codec;
pub mod ingest;
