use super::*;

#[test]
fn codes_are_distinct_and_prefixed() {
    let errors = [
        SpatialError::EmptySelection,
        SpatialError::UnknownStrategy("x".into()),
        SpatialError::UnknownTool("x".into()),
        SpatialError::InvalidInput("x".into()),
        SpatialError::SessionNotFound(Uuid::nil()),
    ];
    let codes: std::collections::HashSet<&str> = errors.iter().map(ErrorCode::error_code).collect();
    assert_eq!(codes.len(), errors.len());
    assert!(codes.iter().all(|c| c.starts_with("E_")));
}

#[test]
fn nothing_is_retryable() {
    assert!(!SpatialError::EmptySelection.retryable());
    assert!(!SpatialError::SessionNotFound(Uuid::nil()).retryable());
}

#[test]
fn messages_name_the_offending_value() {
    assert_eq!(SpatialError::UnknownStrategy("zigzag".into()).to_string(), "unknown grouping strategy: zigzag");
    assert_eq!(SpatialError::UnknownTool("paint".into()).to_string(), "unknown tool: paint");
}

#[test]
fn json_errors_become_invalid_input() {
    let parse: Result<f64, _> = serde_json::from_str("\"big\"");
    let err: SpatialError = parse.unwrap_err().into();
    assert_eq!(err.error_code(), "E_INVALID_INPUT");
}
