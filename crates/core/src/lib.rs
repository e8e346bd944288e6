//! Shared primitives for all Rust crates in Taskdeck.

#![forbid(unsafe_code)]

/// Session primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AccessToken, Session, SessionUser};

/// Result type used across Taskdeck crates.
pub type AppResult<T> = Result<T, AppError>;

/// Message shown when the server rejects the session token.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Message shown for transport and unexpected failures.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Session is missing or has been rejected by the server.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the human message a notification surface should show.
    ///
    /// Validation, authorization, not-found and conflict messages pass
    /// through verbatim. A rejected session maps to a session-expired
    /// notice and everything else to a generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Forbidden(message) => message.clone(),
            Self::Unauthorized(_) => SESSION_EXPIRED_MESSAGE.to_owned(),
            Self::Transport(_) | Self::Internal(_) => GENERIC_FAILURE_MESSAGE.to_owned(),
        }
    }

    /// Returns whether the error was raised before any request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns whether the error means the session should be treated as expired.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, GENERIC_FAILURE_MESSAGE, NonEmptyString, SESSION_EXPIRED_MESSAGE};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn conflict_message_passes_through_verbatim() {
        let error = AppError::Conflict("role name 'qa' is already taken".to_owned());
        assert_eq!(error.user_message(), "role name 'qa' is already taken");
    }

    #[test]
    fn unauthorized_maps_to_session_expired_notice() {
        let error = AppError::Unauthorized("jwt expired".to_owned());
        assert_eq!(error.user_message(), SESSION_EXPIRED_MESSAGE);
        assert!(error.is_session_expired());
    }

    #[test]
    fn transport_failures_use_generic_message() {
        let error = AppError::Transport("connection refused".to_owned());
        assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(!error.is_validation());
    }
}
