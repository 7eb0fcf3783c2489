use reqwest::StatusCode;

use dm_core::errors::{DomainError, ErrorDisposition};

use crate::backend::{error_from_response, extract_message};

#[test]
fn test_status_mapping_follows_propagation_policy() {
    let cases = [
        (StatusCode::UNAUTHORIZED, ErrorDisposition::LogoutAndRedirect),
        (StatusCode::FORBIDDEN, ErrorDisposition::AccessDenied),
        (StatusCode::NOT_FOUND, ErrorDisposition::Notify),
        (StatusCode::CONFLICT, ErrorDisposition::Notify),
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorDisposition::Notify),
    ];
    for (status, disposition) in cases {
        assert_eq!(error_from_response(status, "").disposition(), disposition, "{status}");
    }
}

#[test]
fn test_validation_statuses() {
    for status in [StatusCode::BAD_REQUEST, StatusCode::UNPROCESSABLE_ENTITY] {
        assert!(matches!(
            error_from_response(status, r#"{"message": "date is required"}"#),
            DomainError::Validation { message } if message == "date is required"
        ));
    }
}

#[test]
fn test_server_errors_are_upstream() {
    let err = error_from_response(StatusCode::BAD_GATEWAY, "gateway timeout");
    assert!(matches!(err, DomainError::Upstream { ref message } if message == "HTTP 502: gateway timeout"));
}

#[test]
fn test_unexpected_statuses_are_unknown() {
    let err = error_from_response(StatusCode::IM_A_TEAPOT, "");
    assert!(matches!(err, DomainError::Unknown { ref message } if message.starts_with("HTTP 418")));
    assert_eq!(err.disposition(), ErrorDisposition::Notify);
}

#[test]
fn test_message_extraction() {
    assert_eq!(
        extract_message(StatusCode::BAD_REQUEST, r#"{"error": "bad id"}"#),
        "bad id"
    );
    assert_eq!(extract_message(StatusCode::NOT_FOUND, "  "), "Not Found");
    assert_eq!(extract_message(StatusCode::CONFLICT, "plain text"), "plain text");

    let long = "x".repeat(500);
    assert_eq!(extract_message(StatusCode::BAD_GATEWAY, &long).len(), 200);
}
