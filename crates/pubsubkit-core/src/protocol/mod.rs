//! Wire-level primitives.
//!
//! - `envelope`: the decoded JSON envelope handed over by the transport.
//! - `wire`: serde helpers for the platform's field encodings (string ids,
//!   falsy optionals, fixed-format timestamps).
//!
//! Nothing here panics on bad input: every failure is a `PubSubError`.

pub mod envelope;
pub mod wire;
