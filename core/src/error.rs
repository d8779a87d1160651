//! Error types for the DigitalHumani client.
//!
//! # Design
//! `ApiError` is the single error value of the crate. Configuration errors are
//! returned from constructors; every other variant travels inside
//! `Outcome::Failure`. `NotFound` and `Unauthorized` get dedicated variants
//! because callers routinely branch on them; every other non-2xx response lands
//! in `RequestFailed` with the raw status and body.
//!
//! Underlying causes are held in `Arc` so the error (and therefore the whole
//! envelope) stays `Clone`. Equality compares the variant, the message and the
//! rendered cause, which is what makes classification observably idempotent.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Encoding,
    Transport,
    Unauthorized,
    NotFound,
    RequestFailed,
    Decode,
}

/// Errors produced by the client.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Client construction was given an unusable configuration.
    #[error("{0}")]
    Configuration(String),

    /// The request body could not be serialized. Nothing was sent.
    #[error("failed to encode request body")]
    Encoding(#[source] Arc<serde_json::Error>),

    /// The transport failed before a response was received.
    #[error("request could not be sent")]
    Transport(#[source] Arc<dyn StdError + Send + Sync>),

    /// The server returned 401.
    #[error("not authorised — check your API key")]
    Unauthorized,

    /// The server returned 404.
    #[error("could not find {resource}")]
    NotFound { resource: String },

    /// The server returned a non-2xx status other than 401 and 404.
    #[error("request failed with status {status}")]
    RequestFailed { status: u16, body: String },

    /// A 2xx body did not match the expected payload shape.
    #[error("failed to parse response")]
    Decode(#[source] Arc<serde_json::Error>),
}

impl ApiError {
    pub(crate) fn encoding(err: serde_json::Error) -> Self {
        ApiError::Encoding(Arc::new(err))
    }

    pub(crate) fn transport(err: BoxError) -> Self {
        ApiError::Transport(Arc::from(err))
    }

    pub(crate) fn decode(err: serde_json::Error) -> Self {
        ApiError::Decode(Arc::new(err))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Configuration(_) => ErrorKind::Configuration,
            ApiError::Encoding(_) => ErrorKind::Encoding,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Unauthorized => ErrorKind::Unauthorized,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::RequestFailed { .. } => ErrorKind::RequestFailed,
            ApiError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Human-readable message, without the underlying cause.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The underlying error, if one was captured.
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.source()
    }

    /// HTTP status for errors classified from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }
}

impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ApiError::Configuration(a), ApiError::Configuration(b)) => a == b,
            (ApiError::Unauthorized, ApiError::Unauthorized) => true,
            (ApiError::NotFound { resource: a }, ApiError::NotFound { resource: b }) => a == b,
            (
                ApiError::RequestFailed { status: sa, body: ba },
                ApiError::RequestFailed { status: sb, body: bb },
            ) => sa == sb && ba == bb,
            (ApiError::Encoding(a), ApiError::Encoding(b))
            | (ApiError::Decode(a), ApiError::Decode(b)) => a.to_string() == b.to_string(),
            (ApiError::Transport(a), ApiError::Transport(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
