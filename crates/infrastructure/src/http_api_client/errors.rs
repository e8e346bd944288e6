use reqwest::StatusCode;
use taskdeck_core::AppError;

use crate::dto::ErrorResponse;

/// Maps a non-success response onto the application error taxonomy.
///
/// The server's `message` is kept verbatim. Bodies that are not JSON are
/// used as-is, and empty bodies fall back to the status reason.
#[must_use]
pub fn normalize_error_response(status: StatusCode, body: &str) -> AppError {
    let message = server_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned()
    });

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Internal(format!("status {}: {message}", status.as_u16())),
    }
}

fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorResponse>(trimmed) {
        Ok(payload) => payload.into_message(),
        Err(_) => Some(trimmed.to_owned()),
    }
}
