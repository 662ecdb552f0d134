//! Shared error type across pubsubkit crates.

use thiserror::Error;

use crate::topic::EventName;

/// Stable error codes, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Topic key is not one of the known keys.
    UnrecognizedTopic,
    /// Missing field, wrong type, bad id or bad timestamp.
    MalformedPayload,
    /// Topic is known but has no message model.
    NotImplemented,
    /// Inbound line exceeds the configured limit.
    PayloadTooLarge,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Invalid configuration.
    BadConfig,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnrecognizedTopic => "UNRECOGNIZED_TOPIC",
            ErrorKind::MalformedPayload => "MALFORMED_PAYLOAD",
            ErrorKind::NotImplemented => "NOT_IMPLEMENTED",
            ErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PubSubError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum PubSubError {
    #[error("unrecognized topic: {0}")]
    UnrecognizedTopic(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("no message model for {}", .0.as_str())]
    NotImplemented(EventName),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PubSubError {
    /// Map the error to its stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PubSubError::UnrecognizedTopic(_) => ErrorKind::UnrecognizedTopic,
            PubSubError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            PubSubError::NotImplemented(_) => ErrorKind::NotImplemented,
            PubSubError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            PubSubError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            PubSubError::BadConfig(_) => ErrorKind::BadConfig,
            PubSubError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for PubSubError {
    fn from(e: serde_json::Error) -> Self {
        PubSubError::MalformedPayload(e.to_string())
    }
}
