use axum::http::StatusCode;
use rstest::rstest;
use timetablegen_api::middleware::error_handling::map_error;
use timetablegen_core::errors::{TimetableError, ValidationField, ValidationIssue};

#[rstest]
#[case(
    TimetableError::Validation(vec![ValidationIssue::new(ValidationField::Department, "Department is required")]),
    StatusCode::BAD_REQUEST
)]
#[case(
    TimetableError::Configuration("subject pool is empty".to_string()),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(
    TimetableError::Generation("model response is not well-formed JSON".to_string()),
    StatusCode::BAD_GATEWAY
)]
fn test_error_status_mapping(#[case] error: TimetableError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}
