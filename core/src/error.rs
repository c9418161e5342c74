//! Error types for the todo API client.
//!
//! # Design
//! The statuses the server uses to reject a request get their own variants
//! so callers can branch on them. Anything else lands in `HttpError` with
//! the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 400. Carries the server's message.
    #[error("bad request: {}", .0.trim_end())]
    BadRequest(String),

    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 409; a todo with that id already exists.
    #[error("resource already exists")]
    Conflict,

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
