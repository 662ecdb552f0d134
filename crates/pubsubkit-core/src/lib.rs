//! pubsubkit core: envelope parsing, topic table, and typed PubSub messages.
//!
//! This crate turns decoded PubSub envelopes into typed message values. It
//! carries no transport or runtime dependencies: callers hand it an already
//! decoded [`protocol::envelope::Envelope`] and a [`refs::ClientHandle`], and
//! get back an event name plus a [`models::Message`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! Malformed input surfaces as `PubSubError::MalformedPayload`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod dispatch;
pub mod error;
pub mod models;
pub mod protocol;
pub mod refs;
pub mod topic;

/// Shared result type.
pub use error::{ErrorKind, PubSubError, Result};
pub use dispatch::{create_channel_points_message, create_message, route_envelope};
pub use models::Message;
pub use topic::{EventName, TopicKey};
