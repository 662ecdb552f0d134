//! Event routing exports.
//!
//! Re-exports the router and handler trait so downstream consumers can
//! depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{EventHandler, EventRouter};
