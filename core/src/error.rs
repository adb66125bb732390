//! Error types for the inventory API client.
//!
//! # Design
//! Three failure kinds reach callers of the list/create/delete operations:
//! the request never completed, the server answered outside the expected
//! status range, or the body did not decode into the expected shape. A 404
//! is a `BadStatus` like any other; `is_not_found` exists for callers that
//! want to tell "already gone" apart.

use thiserror::Error;

/// Errors returned by `ProductClient` parse methods and by `Transport`
/// implementations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be received.
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    /// The server responded with a status outside the accepted range.
    #[error("HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// The response body is not valid JSON or not the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status code carried by a `BadStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
