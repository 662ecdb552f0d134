//! Top-level facade crate for pubsubkit.
//!
//! Re-exports the core types and the client library so users can depend on a single crate.

pub mod core {
    pub use pubsubkit_core::*;
}

pub mod client {
    pub use pubsubkit_client::*;
}
