//! Error types for the ER:LC API client.
//!
//! # Design
//! A 403 gets a dedicated `Authentication` variant and is checked before any
//! other status classification: callers almost always want to tell "the
//! server key is wrong" apart from "the request failed". Every other non-2xx
//! response lands in `Request` with the raw status code and body.

use thiserror::Error;

/// Failure of the underlying network exchange (DNS, connect, TLS, reset).
///
/// Wraps the transport's own error unchanged so callers can downcast it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            source: error.into(),
        }
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.source
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error)
    }
}

/// Errors returned by `ErlcApi` parse methods and `ErlcClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 403: the server key is invalid or lacks permission.
    #[error("invalid access token")]
    Authentication,

    /// The server returned a non-2xx status other than 403.
    #[error("HTTP {status}: {body}")]
    Request { status: u16, body: String },

    /// A 2xx response whose body could not be decoded into the expected type.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A `ServerInfo` convenience call was made on a value that was not
    /// produced by `ErlcClient::fetch_server`.
    #[error("server info is not attached to a client")]
    Detached,
}

impl ApiError {
    /// The HTTP status that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication => Some(403),
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// What the upstream API documents a status code to mean.
    pub fn hint(&self) -> Option<&'static str> {
        match self.status()? {
            400 => Some("invalid command"),
            403 => Some("invalid access token"),
            422 => Some("server contains no players"),
            429 => Some("rate limited"),
            500 => Some("problem communicating with Roblox"),
            _ => None,
        }
    }
}
