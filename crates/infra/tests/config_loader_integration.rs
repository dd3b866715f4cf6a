//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use bookingcal_domain::{BookingCalError, ShapingMode};
use bookingcal_infra::config;
use tempfile::NamedTempFile;

fn write_temp(contents: &str, extension: &str) -> (NamedTempFile, std::path::PathBuf) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    (temp_file, path)
}

#[test]
fn test_load_full_toml_file() {
    let toml_content = r#"
[credentials]
username = "parent@example.com"
password = "secret"

[scraper]
webdriver_url = "http://127.0.0.1:4444"
headless = true
month_budget = 12
header_wait_secs = 20

[export]
output_dir = "calendars"
timezone = "Europe/Dublin"
summary_includes_time_range = false

[export.shaping]
mode = "reminder"
reminder_time = "06:30"
reminder_duration_minutes = 45
"#;

    let (_temp, path) = write_temp(toml_content, "toml");
    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(&path).ok();

    let config = result.expect("Failed to load config from TOML file");
    assert_eq!(config.credentials.username, "parent@example.com");
    assert_eq!(config.scraper.webdriver_url, "http://127.0.0.1:4444");
    assert!(config.scraper.headless);
    assert_eq!(config.scraper.month_budget, 12);
    assert_eq!(config.scraper.header_wait_secs, 20);
    assert_eq!(config.export.output_dir, "calendars");
    assert!(!config.export.summary_includes_time_range);
    assert_eq!(config.export.shaping.mode, ShapingMode::Reminder);
    assert_eq!(config.export.shaping.reminder_duration_minutes, 45);
    assert!(config::validate(&config).is_ok());
}

#[test]
fn test_load_json_file_and_validate() {
    let json_content = r#"{
        "credentials": { "username": "parent@example.com", "password": "secret" },
        "export": { "timezone": "Europe/Lndon" }
    }"#;

    let (_temp, path) = write_temp(json_content, "json");
    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(&path).ok();

    let config = result.expect("Failed to load config from JSON file");
    let err = config::validate(&config).expect_err("misspelled timezone");
    assert!(matches!(err, BookingCalError::Config(_)));
}

#[test]
fn test_missing_credentials_fail_validation() {
    let (_temp, path) = write_temp("[scraper]\nmonth_budget = 1\n", "toml");
    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(&path).ok();

    let config = result.expect("credentials are optional in the file");
    assert!(config.credentials.username.is_empty());
    assert!(matches!(config::validate(&config), Err(BookingCalError::Config(_))));
}

#[test]
fn test_zero_month_budget_fails_validation() {
    let toml_content = r#"
[credentials]
username = "parent@example.com"
password = "secret"

[scraper]
month_budget = 0
"#;

    let (_temp, path) = write_temp(toml_content, "toml");
    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(&path).ok();

    let config = result.expect("file parses");
    assert!(matches!(config::validate(&config), Err(BookingCalError::Config(_))));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let (_temp, path) = write_temp("[scraper\nmonth_budget = ", "toml");
    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(BookingCalError::Config(ref m)) if m.contains("TOML")));
}
