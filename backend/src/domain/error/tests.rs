//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::render_failed("bad template"), ErrorCode::RenderFailed)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(
        error.trace_id(),
        Some("00000000-0000-0000-0000-000000000000")
    );
}

#[test]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[test]
fn serialises_codes_in_snake_case_and_omits_empty_fields() {
    let value = serde_json::to_value(Error::render_failed("missing users.html"))
        .expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "render_failed", "message": "missing users.html" })
    );
}

#[test]
fn display_uses_message() {
    let error = Error::service_unavailable("database unavailable");
    assert_eq!(error.to_string(), "database unavailable");
}
