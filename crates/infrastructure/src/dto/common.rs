use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error body returned by the API.
///
/// Older endpoints use `error` instead of `message`.
#[derive(Debug, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api/error-response.ts")]
pub struct ErrorResponse {
    /// Human-readable failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure message under the older key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Returns the first non-empty message field.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|value| !value.trim().is_empty())
            .or(self.error.filter(|value| !value.trim().is_empty()))
    }
}
