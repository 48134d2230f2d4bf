use crate::error::{ErrorContext, JiraError, ProbeFailure};

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found",
    ));

    match result.context("Failed to read config file") {
        Err(JiraError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read config file"));
            assert!(msg.contains("file not found"));
        }
        other => panic!("Expected JiraError::Unknown, got {:?}", other),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied",
    ));

    match result.with_context(|| format!("Failed to open report file {}", "/tmp/plan.jsonl")) {
        Err(JiraError::Unknown(msg)) => {
            assert!(msg.contains("/tmp/plan.jsonl"));
            assert!(msg.contains("access denied"));
        }
        other => panic!("Expected JiraError::Unknown, got {:?}", other),
    }
}

#[test]
fn test_error_context_passes_success_through() {
    let result: Result<i32, std::io::Error> = Ok(42);
    assert_eq!(result.context("unused").unwrap(), 42);
}

#[test]
fn test_http_error_display_and_status() {
    let error = JiraError::http("Failed to create issue in JIRA.", 400, "{\"errors\":{}}");
    assert_eq!(error.status(), Some(400));
    assert_eq!(
        error.to_string(),
        "Failed to create issue in JIRA. (HTTP 400): {\"errors\":{}}"
    );
}

#[test]
fn test_connectivity_error_display() {
    let error = JiraError::Connectivity {
        status: 401,
        reason: ProbeFailure::from_status(401),
    };
    assert_eq!(error.status(), Some(401));
    assert_eq!(error.to_string(), "HTTP response code 401, reason Unauthorized");
}

#[test]
fn test_probe_failure_from_status() {
    assert_eq!(ProbeFailure::from_status(400), ProbeFailure::BadRequest);
    assert_eq!(ProbeFailure::from_status(401), ProbeFailure::Unauthorized);
    assert_eq!(ProbeFailure::from_status(404), ProbeFailure::Unknown);
    assert_eq!(ProbeFailure::from_status(503), ProbeFailure::Unknown);
}

#[test]
fn test_non_http_errors_have_no_status() {
    assert_eq!(JiraError::InvalidInput("x".to_string()).status(), None);
    assert_eq!(JiraError::NotFound("x".to_string()).status(), None);
}

#[test]
fn test_from_conversions() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let error: JiraError = io_error.into();
    assert!(matches!(error, JiraError::IoError(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
    let error: JiraError = json_error.into();
    assert!(matches!(error, JiraError::JsonError(_)));
}
