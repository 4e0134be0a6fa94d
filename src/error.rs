//! Error Types
//!
//! Transport failures from the gateway and the user-facing error taxonomy.

use thiserror::Error;

/// Failure talking to the remote todo collection.
///
/// Every variant is treated the same by callers; the distinction only shows up in logs.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors shown in the notification banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TodoError {
    #[error("Unable to load todos")]
    LoadFailed,
    #[error("Unable to add a todo")]
    AddFailed,
    #[error("Unable to update a todo")]
    UpdateFailed,
    #[error("Unable to delete a todo")]
    DeleteFailed,
    #[error("Title should not be empty")]
    EmptyTitle,
}
