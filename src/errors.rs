use thiserror::Error;

/// The central error type for the coach.
///
/// The content service never lets these escape to the study views; they
/// surface only from configuration loading, the HTTP client, and the CLI.
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not parse generated content: {0}")]
    Parse(String),

    #[error("Unknown syllabus reference: {0}")]
    Syllabus(String),

    #[error("{0}")]
    Usage(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request timed out")]
    Timeout,

    #[error("Rate limit exceeded. Retry after {retry_after_secs:?} seconds")]
    RateLimit { retry_after_secs: Option<u64> },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Map an HTTP failure status and body to the matching variant.
    pub fn from_status(status: u16, message: String, retry_after_secs: Option<u64>) -> Self {
        match status {
            401 | 403 => ApiError::Authentication(message),
            429 => ApiError::RateLimit { retry_after_secs },
            _ => ApiError::HttpStatus { status, message },
        }
    }

    /// Whether another attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Timeout | ApiError::Network(_) | ApiError::RateLimit { .. } => true,
            ApiError::HttpStatus { status, .. } => matches!(status, 500 | 502 | 503 | 504),
            ApiError::Authentication(_) | ApiError::Parse(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;

pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_USAGE_ERROR: u8 = 3;
pub const EXIT_API_ERROR: u8 = 4;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(coach_err) = e.downcast_ref::<CoachError>() {
        return match coach_err {
            CoachError::Config(_) => EXIT_CONFIG_ERROR,
            CoachError::Api(_) => EXIT_API_ERROR,
            CoachError::Syllabus(_) | CoachError::Usage(_) => EXIT_USAGE_ERROR,
            _ => EXIT_ERROR,
        };
    }

    if e.downcast_ref::<ApiError>().is_some() {
        return EXIT_API_ERROR;
    }

    EXIT_ERROR
}
