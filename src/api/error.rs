//! API error types.

use thiserror::Error;

/// Errors produced by backend calls.
///
/// Two failure kinds are distinguished because they take different UI
/// paths: `Api` means the backend responded and reported a failure (shown
/// inline, using the server's own message), while `Transport` covers
/// everything that prevented a well-formed response from arriving
/// (connection refused, non-JSON body, request serialization).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a parseable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend responded with `success: false`. The payload is the
    /// server-supplied message; an empty string means the server sent none.
    #[error("{0}")]
    Api(String),
}

impl ApiError {
    /// Returns true for transport-level failures (unreachable backend,
    /// malformed body).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
