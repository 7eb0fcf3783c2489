//! HTTP status to domain error mapping

use reqwest::StatusCode;
use serde_json::Value;

use dm_core::errors::DomainError;

const MAX_MESSAGE_LEN: usize = 200;

/// Human-readable message from an error body
///
/// Prefers a JSON `message` or `error` field; falls back to the raw body,
/// then to the status reason.
pub fn extract_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        ["message", "error"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    let message = from_json.unwrap_or_else(|| body.trim().to_string());
    if message.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }
    message.chars().take(MAX_MESSAGE_LEN).collect()
}

/// Map a failed response onto the propagation policy's error kinds
pub fn error_from_response(status: StatusCode, body: &str) -> DomainError {
    let message = extract_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED => DomainError::Unauthenticated { reason: message },
        StatusCode::FORBIDDEN => DomainError::forbidden(message),
        StatusCode::NOT_FOUND => DomainError::not_found(message),
        StatusCode::CONFLICT => DomainError::conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => DomainError::validation(message),
        s if s.is_server_error() => {
            DomainError::upstream(format!("HTTP {}: {}", status.as_u16(), message))
        }
        _ => DomainError::Unknown {
            message: format!("HTTP {}: {}", status.as_u16(), message),
        },
    }
}
