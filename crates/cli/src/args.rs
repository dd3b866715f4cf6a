//! Command-line arguments
//!
//! Flags override values from the config file and the environment.

use std::path::PathBuf;

use bookingcal_domain::{BookingCalError, Config, ShapingMode};
use clap::Parser;

/// Export ParentZone bookings into one iCalendar file per month
#[derive(Parser, Debug, Default)]
#[command(name = "bookingcal")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Config file (TOML or JSON); probed in standard locations if omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of months to read, starting with the one shown on load
    #[arg(short, long)]
    pub months: Option<u32>,

    /// Directory the .ics files are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Event times: the booked session window, or a fixed-time reminder
    #[arg(long, value_parser = ["literal", "reminder"])]
    pub mode: Option<String>,

    /// Reminder start time (HH:MM), reminder mode only
    #[arg(long)]
    pub reminder_time: Option<String>,

    /// Reminder length in minutes, reminder mode only
    #[arg(long)]
    pub reminder_duration: Option<u32>,

    /// Use the child's name alone as the event title
    #[arg(long)]
    pub no_time_in_summary: bool,

    /// Run Chrome without a visible window
    #[arg(long)]
    pub headless: bool,

    /// WebDriver endpoint, e.g. a running chromedriver
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Apply the flags that were given on top of `config`.
    ///
    /// # Errors
    /// Returns `BookingCalError::InvalidInput` for an unknown shaping mode.
    pub fn apply(&self, config: &mut Config) -> bookingcal_domain::Result<()> {
        if let Some(months) = self.months {
            config.scraper.month_budget = months;
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.display().to_string();
        }
        if let Some(mode) = &self.mode {
            config.export.shaping.mode =
                mode.parse::<ShapingMode>().map_err(BookingCalError::InvalidInput)?;
        }
        if let Some(time) = &self.reminder_time {
            config.export.shaping.reminder_time.clone_from(time);
        }
        if let Some(minutes) = self.reminder_duration {
            config.export.shaping.reminder_duration_minutes = minutes;
        }
        if self.no_time_in_summary {
            config.export.summary_includes_time_range = false;
        }
        if self.headless {
            config.scraper.headless = true;
        }
        if let Some(url) = &self.webdriver_url {
            config.scraper.webdriver_url.clone_from(url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "bookingcal",
            "--months",
            "6",
            "--output-dir",
            "out",
            "--mode",
            "reminder",
            "--reminder-time",
            "06:30",
            "--reminder-duration",
            "10",
            "--no-time-in-summary",
            "--headless",
            "--webdriver-url",
            "http://127.0.0.1:4444",
        ]);

        let mut config = Config::default();
        args.apply(&mut config).unwrap();

        assert_eq!(config.scraper.month_budget, 6);
        assert_eq!(config.export.output_dir, "out");
        assert_eq!(config.export.shaping.mode, ShapingMode::Reminder);
        assert_eq!(config.export.shaping.reminder_time, "06:30");
        assert_eq!(config.export.shaping.reminder_duration_minutes, 10);
        assert!(!config.export.summary_includes_time_range);
        assert!(config.scraper.headless);
        assert_eq!(config.scraper.webdriver_url, "http://127.0.0.1:4444");
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let args = Args::parse_from(["bookingcal"]);
        let mut config = Config::default();
        config.scraper.month_budget = 9;
        config.scraper.headless = true;

        args.apply(&mut config).unwrap();

        assert_eq!(config.scraper.month_budget, 9);
        assert!(config.scraper.headless);
        assert!(config.export.summary_includes_time_range);
    }

    #[test]
    fn unknown_mode_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["bookingcal", "--mode", "alarm"]).is_err());
    }
}
