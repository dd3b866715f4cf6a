//! Configuration structures
//!
//! Loaded once at startup by the infrastructure layer and treated as
//! immutable for the rest of the run. Every section has defaults so partial
//! config files are accepted; only the credentials are mandatory.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOOKINGS_PAGE_SETTLE_SECS, DEFAULT_BOOKINGS_URL, DEFAULT_CALENDAR_NAME_PREFIX,
    DEFAULT_CHILD_IDENTIFIER, DEFAULT_DESCRIPTION_PREFIX, DEFAULT_FILE_PREFIX, DEFAULT_LOGIN_URL,
    DEFAULT_MONTH_BUDGET, DEFAULT_OUTPUT_DIR, DEFAULT_PRODUCT_ID, DEFAULT_REMINDER_DURATION_MINUTES,
    DEFAULT_REMINDER_TIME, DEFAULT_TIMEZONE, DEFAULT_UID_DOMAIN, DEFAULT_UID_PREFIX,
    DEFAULT_WEBDRIVER_URL, HEADER_SETTLE_SECS, HEADER_WAIT_SECS, LOGIN_FORM_WAIT_SECS,
    LOGIN_SETTLE_SECS, NAVIGATION_POLL_INTERVAL_MS, NAVIGATION_TIMEOUT_SECS,
    POST_NAVIGATION_DELAY_MS,
};
use crate::errors::{BookingCalError, Result};
use crate::impl_text_enum_conversions;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Usually supplied through the environment rather than a file.
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    /// Returns `BookingCalError::Config` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.username.trim().is_empty() {
            return Err(BookingCalError::Config("username must not be empty".into()));
        }
        if self.credentials.password.is_empty() {
            return Err(BookingCalError::Config("password must not be empty".into()));
        }
        if self.scraper.month_budget == 0 {
            return Err(BookingCalError::Config("month budget must be at least 1".into()));
        }
        if self.scraper.navigation_poll_interval_ms == 0 {
            return Err(BookingCalError::Config(
                "navigation poll interval must be greater than zero".into(),
            ));
        }
        if self.export.shaping.reminder_duration_minutes == 0 {
            return Err(BookingCalError::Config(
                "reminder duration must be at least one minute".into(),
            ));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(BookingCalError::Config("file prefix must not be empty".into()));
        }
        Ok(())
    }
}

/// Login credentials for the bookings site
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Browser session and page traversal settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScraperConfig {
    pub login_url: String,
    pub bookings_url: String,
    pub webdriver_url: String,
    pub headless: bool,
    /// Number of months to read, starting with the one displayed on load.
    pub month_budget: u32,
    pub header_wait_secs: u64,
    pub header_settle_secs: u64,
    pub navigation_timeout_secs: u64,
    pub navigation_poll_interval_ms: u64,
    pub post_navigation_delay_ms: u64,
    pub login_form_wait_secs: u64,
    pub login_settle_secs: u64,
    pub bookings_page_settle_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            bookings_url: DEFAULT_BOOKINGS_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: false,
            month_budget: DEFAULT_MONTH_BUDGET,
            header_wait_secs: HEADER_WAIT_SECS,
            header_settle_secs: HEADER_SETTLE_SECS,
            navigation_timeout_secs: NAVIGATION_TIMEOUT_SECS,
            navigation_poll_interval_ms: NAVIGATION_POLL_INTERVAL_MS,
            post_navigation_delay_ms: POST_NAVIGATION_DELAY_MS,
            login_form_wait_secs: LOGIN_FORM_WAIT_SECS,
            login_settle_secs: LOGIN_SETTLE_SECS,
            bookings_page_settle_secs: BOOKINGS_PAGE_SETTLE_SECS,
        }
    }
}

/// How exported event times are derived from a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapingMode {
    /// Event spans the booked session window.
    #[default]
    Literal,
    /// Event is a fixed-time reminder on the booking's day.
    Reminder,
}

impl_text_enum_conversions!(ShapingMode {
    Literal => "literal",
    Reminder => "reminder",
});

/// Event time shaping settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShapingConfig {
    pub mode: ShapingMode,
    /// Time of day for reminder events, `HH:MM`.
    pub reminder_time: String,
    pub reminder_duration_minutes: u32,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            mode: ShapingMode::Literal,
            reminder_time: DEFAULT_REMINDER_TIME.to_string(),
            reminder_duration_minutes: DEFAULT_REMINDER_DURATION_MINUTES,
        }
    }
}

/// Calendar file export settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
    pub file_prefix: String,
    pub calendar_name_prefix: String,
    /// IANA timezone name written to the calendar header.
    pub timezone: String,
    pub product_id: String,
    pub uid_prefix: String,
    pub uid_domain: String,
    pub description_prefix: String,
    pub default_child_identifier: String,
    /// Append a rendered `9am-5pm` range to each summary.
    pub summary_includes_time_range: bool,
    pub shaping: ShapingConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            calendar_name_prefix: DEFAULT_CALENDAR_NAME_PREFIX.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_prefix: DEFAULT_UID_PREFIX.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
            default_child_identifier: DEFAULT_CHILD_IDENTIFIER.to_string(),
            summary_includes_time_range: true,
            shaping: ShapingConfig::default(),
        }
    }
}
