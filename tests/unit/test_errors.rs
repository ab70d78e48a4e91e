//! Unit tests for error classification and exit codes

use ceh_coach::errors::{
    get_exit_code, ApiError, CoachError, EXIT_API_ERROR, EXIT_CONFIG_ERROR, EXIT_ERROR,
    EXIT_USAGE_ERROR,
};

#[test]
fn test_exit_codes_by_kind() {
    let config = anyhow::Error::new(CoachError::Config("bad toml".into()));
    let syllabus = anyhow::Error::new(CoachError::Syllabus("module 13".into()));
    let usage = anyhow::Error::new(CoachError::Usage("Please enter a question.".into()));
    let api = anyhow::Error::new(ApiError::Timeout);
    let other = anyhow::anyhow!("something else");

    assert_eq!(get_exit_code(&config), EXIT_CONFIG_ERROR);
    assert_eq!(get_exit_code(&syllabus), EXIT_USAGE_ERROR);
    assert_eq!(get_exit_code(&usage), EXIT_USAGE_ERROR);
    assert_eq!(get_exit_code(&api), EXIT_API_ERROR);
    assert_eq!(get_exit_code(&other), EXIT_ERROR);
}

#[test]
fn test_status_mapping() {
    assert!(matches!(
        ApiError::from_status(401, "denied".into(), None),
        ApiError::Authentication(_)
    ));
    assert!(matches!(
        ApiError::from_status(429, "slow down".into(), Some(3)),
        ApiError::RateLimit {
            retry_after_secs: Some(3)
        }
    ));
    assert!(ApiError::from_status(503, "unavailable".into(), None).is_transient());
    assert!(!ApiError::from_status(400, "bad request".into(), None).is_transient());
}

#[test]
fn test_usage_message_is_bare() {
    let err = CoachError::Usage("Please enter a question.".into());
    assert_eq!(err.to_string(), "Please enter a question.");
}
