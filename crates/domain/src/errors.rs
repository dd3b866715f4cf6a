//! Error types used throughout the application

use thiserror::Error;

/// Main error type for BookingCal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingCalError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Browser(_) => "browser",
            Self::Navigation(_) => "navigation",
            Self::Auth(_) => "auth",
            Self::Parse(_) => "parse",
            Self::Export(_) => "export",
            Self::Io(_) => "io",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for BookingCal operations
pub type Result<T> = std::result::Result<T, BookingCalError>;

/// Failure to interpret text scraped from the calendar page.
///
/// These are recoverable: the caller skips the offending month snapshot or
/// booking and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not split month header into month and year: {0:?}")]
    MalformedHeader(String),

    #[error("unrecognised month abbreviation: {0:?}")]
    UnknownMonth(String),

    #[error("invalid year in month header: {0:?}")]
    InvalidYear(String),

    #[error("malformed day label: {0:?}")]
    MalformedDayLabel(String),

    #[error("day {day} does not exist in {year}-{month:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("time range does not match H:MM - H:MM: {0:?}")]
    MalformedTimeRange(String),

    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),
}

impl From<ParseError> for BookingCalError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value.to_string())
    }
}
