//! Request ID generation and response header helpers.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's request id when it is short printable ASCII,
/// otherwise mint a UUIDv7.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(generate_request_id)
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    let header_value = match HeaderValue::from_str(request_id) {
        Ok(value) => value,
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );

            return;
        }
    };

    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_request_id_is_reused() {
        assert_eq!(resolve_request_id(Some("abc-123".to_string())), "abc-123");
    }

    #[test]
    fn oversized_or_unprintable_ids_are_replaced() {
        let oversized = "a".repeat(MAX_REQUEST_ID_LEN + 1);

        assert_ne!(resolve_request_id(Some(oversized.clone())), oversized);
        assert_ne!(resolve_request_id(Some("abc\u{7f}".to_string())), "abc\u{7f}");
    }

    #[test]
    fn blank_request_id_is_replaced() {
        let generated = resolve_request_id(Some("   ".to_string()));

        assert!(Uuid::parse_str(&generated).is_ok(), "expected a generated uuid");
    }
}
