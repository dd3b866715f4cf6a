//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Source site
pub const DEFAULT_LOGIN_URL: &str = "https://www.parentzone.me/login";
pub const DEFAULT_BOOKINGS_URL: &str = "https://www.parentzone.me/bookings";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Prefix rendered in front of the month label in the page header.
pub const MONTH_HEADER_PREFIX: &str = "Bookings - ";

/// Identifier used when a booking element carries no child name.
pub const DEFAULT_CHILD_IDENTIFIER: &str = "ParentZone Booking";

// Traversal
pub const DEFAULT_MONTH_BUDGET: u32 = 3;
pub const HEADER_WAIT_SECS: u64 = 15;
pub const HEADER_SETTLE_SECS: u64 = 5;
pub const NAVIGATION_TIMEOUT_SECS: u64 = 5;
pub const NAVIGATION_POLL_INTERVAL_MS: u64 = 250;
pub const POST_NAVIGATION_DELAY_MS: u64 = 1000;
pub const LOGIN_FORM_WAIT_SECS: u64 = 15;
pub const LOGIN_SETTLE_SECS: u64 = 5;
pub const BOOKINGS_PAGE_SETTLE_SECS: u64 = 5;

// Export
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_FILE_PREFIX: &str = "parentzone_bookings";
pub const DEFAULT_CALENDAR_NAME_PREFIX: &str = "ParentZone";
pub const DEFAULT_TIMEZONE: &str = "Europe/London";
pub const DEFAULT_PRODUCT_ID: &str = "-//ParentZone Scraper//EN";
pub const DEFAULT_UID_PREFIX: &str = "parentzone";
pub const DEFAULT_UID_DOMAIN: &str = "parentzone.me";
pub const DEFAULT_DESCRIPTION_PREFIX: &str = "ParentZone booking";
pub const DEFAULT_REMINDER_TIME: &str = "07:00";
pub const DEFAULT_REMINDER_DURATION_MINUTES: u32 = 30;
pub const ICS_EXTENSION: &str = "ics";
