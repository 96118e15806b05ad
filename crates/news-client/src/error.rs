//! Client-side error types.

use thiserror::Error;

/// Failures talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status and an error envelope.
    #[error("{error} ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Api {
        status: u16,
        error: String,
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Failures reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}
