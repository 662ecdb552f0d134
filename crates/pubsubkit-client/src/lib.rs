//! pubsubkit client library entry.
//!
//! This crate wires config, the client handle, the ingest loop, and event
//! routing around the core dispatcher. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod services;
pub mod transport;
