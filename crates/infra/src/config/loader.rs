//! Configuration loader
//!
//! Builds the run configuration from, in increasing precedence: built-in
//! defaults, a config file, and environment variables. Command-line
//! overrides are applied by the binary on top of the result.
//!
//! ## Environment Variables
//! - `BOOKINGCAL_USERNAME` / `BOOKINGCAL_PASSWORD`: login credentials
//! - `BOOKINGCAL_MONTHS`: number of months to read
//! - `BOOKINGCAL_OUTPUT_DIR`: directory for the `.ics` files
//! - `BOOKINGCAL_SHAPING_MODE`: `literal` or `reminder`
//! - `BOOKINGCAL_REMINDER_TIME`: reminder start, `HH:MM`
//! - `BOOKINGCAL_REMINDER_DURATION_MINUTES`: reminder length
//! - `BOOKINGCAL_SUMMARY_TIME_RANGE`: append `9am-5pm` to summaries (true/false)
//! - `BOOKINGCAL_WEBDRIVER_URL`: WebDriver endpoint
//! - `BOOKINGCAL_HEADLESS`: run Chrome headless (true/false)
//! - `BOOKINGCAL_TIMEZONE`: IANA timezone for the calendar header
//!
//! ## File Locations
//! Without an explicit path the loader probes, in order:
//! 1. `./bookingcal.toml`, `./bookingcal.json`
//! 2. `./config.toml`, `./config.json`
//! 3. The same names next to the executable
//!
//! A missing file is not an error; defaults are used instead.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use bookingcal_domain::{BookingCalError, Config, Result, ShapingMode};
use chrono::NaiveTime;
use chrono_tz::Tz;

const CONFIG_FILE_NAMES: [&str; 4] =
    ["bookingcal.toml", "bookingcal.json", "config.toml", "config.json"];

pub const ENV_USERNAME: &str = "BOOKINGCAL_USERNAME";
pub const ENV_PASSWORD: &str = "BOOKINGCAL_PASSWORD";
pub const ENV_MONTHS: &str = "BOOKINGCAL_MONTHS";
pub const ENV_OUTPUT_DIR: &str = "BOOKINGCAL_OUTPUT_DIR";
pub const ENV_SHAPING_MODE: &str = "BOOKINGCAL_SHAPING_MODE";
pub const ENV_REMINDER_TIME: &str = "BOOKINGCAL_REMINDER_TIME";
pub const ENV_REMINDER_DURATION: &str = "BOOKINGCAL_REMINDER_DURATION_MINUTES";
pub const ENV_SUMMARY_TIME_RANGE: &str = "BOOKINGCAL_SUMMARY_TIME_RANGE";
pub const ENV_WEBDRIVER_URL: &str = "BOOKINGCAL_WEBDRIVER_URL";
pub const ENV_HEADLESS: &str = "BOOKINGCAL_HEADLESS";
pub const ENV_TIMEZONE: &str = "BOOKINGCAL_TIMEZONE";

/// Load configuration with the standard layering
///
/// Reads `path` if given (it must exist), otherwise the first probed config
/// file, otherwise starts from defaults. Environment variables are applied
/// last. The result is not validated; call [`validate`] once all overrides
/// are in place.
///
/// # Errors
/// Returns `BookingCalError::Config` if the file cannot be read or parsed,
/// or an environment variable has an invalid value.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path.or_else(probe_config_paths) {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from defaults and environment variables only
///
/// # Errors
/// Returns `BookingCalError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports JSON and
/// TOML (detected by file extension). Sections and fields missing from the
/// file keep their defaults.
///
/// # Errors
/// Returns `BookingCalError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BookingCalError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BookingCalError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BookingCalError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BookingCalError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BookingCalError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BookingCalError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard paths for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Load a `.env` file from the working directory or its parents, if any.
///
/// Variables already set in the process environment win.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
            None
        }
    }
}

/// Overwrite fields of `config` with any `BOOKINGCAL_*` variables that are set
///
/// # Errors
/// Returns `BookingCalError::Config` if a numeric or enum variable cannot be
/// parsed.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(username) = env_opt(ENV_USERNAME) {
        config.credentials.username = username;
    }
    if let Some(password) = env_opt(ENV_PASSWORD) {
        config.credentials.password = password;
    }
    if let Some(months) = env_opt(ENV_MONTHS) {
        config.scraper.month_budget = months
            .trim()
            .parse::<u32>()
            .map_err(|e| BookingCalError::Config(format!("Invalid {ENV_MONTHS}: {}", e)))?;
    }
    if let Some(dir) = env_opt(ENV_OUTPUT_DIR) {
        config.export.output_dir = dir;
    }
    if let Some(mode) = env_opt(ENV_SHAPING_MODE) {
        config.export.shaping.mode = ShapingMode::from_str(&mode)
            .map_err(|e| BookingCalError::Config(format!("Invalid {ENV_SHAPING_MODE}: {}", e)))?;
    }
    if let Some(time) = env_opt(ENV_REMINDER_TIME) {
        config.export.shaping.reminder_time = time.trim().to_string();
    }
    if let Some(minutes) = env_opt(ENV_REMINDER_DURATION) {
        config.export.shaping.reminder_duration_minutes =
            minutes.trim().parse::<u32>().map_err(|e| {
                BookingCalError::Config(format!("Invalid {ENV_REMINDER_DURATION}: {}", e))
            })?;
    }
    config.export.summary_includes_time_range =
        env_bool(ENV_SUMMARY_TIME_RANGE, config.export.summary_includes_time_range);
    if let Some(url) = env_opt(ENV_WEBDRIVER_URL) {
        config.scraper.webdriver_url = url;
    }
    config.scraper.headless = env_bool(ENV_HEADLESS, config.scraper.headless);
    if let Some(timezone) = env_opt(ENV_TIMEZONE) {
        config.export.timezone = timezone.trim().to_string();
    }
    Ok(())
}

/// Validate a fully layered configuration
///
/// Runs the structural checks on [`Config`] plus the ones that need
/// infrastructure crates: the timezone must be a known IANA name and the
/// reminder time must be `HH:MM`.
///
/// # Errors
/// Returns `BookingCalError::Config` describing the first violation.
pub fn validate(config: &Config) -> Result<()> {
    config.validate()?;

    config.export.timezone.parse::<Tz>().map_err(|_| {
        BookingCalError::Config(format!("Unknown timezone: {}", config.export.timezone))
    })?;

    NaiveTime::parse_from_str(&config.export.shaping.reminder_time, "%H:%M").map_err(|_| {
        BookingCalError::Config(format!(
            "Reminder time must be HH:MM, got {:?}",
            config.export.shaping.reminder_time
        ))
    })?;

    Ok(())
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
