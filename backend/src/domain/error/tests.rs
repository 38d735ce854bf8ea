//! Construction and trace capture for domain errors.

use super::*;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
    assert!(error.field_errors().is_empty());
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values(base_error: Error) {
    let result = base_error.try_with_trace_id("  ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn field_constructor_records_field_message() {
    let err = Error::field(ErrorCode::InvalidRequest, "type", "bad type");
    assert_eq!(err.message(), "bad type");
    assert_eq!(err.field_errors().len(), 1);
    assert_eq!(err.field_errors()["type"], "bad type");
}

#[rstest]
fn field_errors_accumulate(base_error: Error) {
    let err = base_error
        .with_field_error("name", "required")
        .with_field_error("type", "invalid");
    let fields: Vec<_> = err.field_errors().keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["name", "type"]);
}

#[rstest]
fn no_trace_id_outside_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn display_uses_message(base_error: Error) {
    assert_eq!(base_error.to_string(), "bad");
}
