//! Shared test helpers for `bookingcal-core` integration tests.
//!
//! Provides a scripted calendar page and an in-memory export sink so the
//! pipeline can be exercised without a browser or filesystem.

#![allow(dead_code)]

pub mod sink;
pub mod surface;

use bookingcal_core::{BookingElement, DayCell};
use bookingcal_domain::{Config, CredentialsConfig, ExportConfig, ScraperConfig, ShapingMode};

/// Config with default wait bounds and the given month budget.
pub fn config(month_budget: u32) -> Config {
    Config {
        credentials: CredentialsConfig {
            username: "parent@example.com".into(),
            password: "secret".into(),
        },
        scraper: ScraperConfig { month_budget, ..ScraperConfig::default() },
        export: ExportConfig::default(),
    }
}

/// Same as [`config`] with reminder shaping at 07:00 for 30 minutes.
pub fn reminder_config(month_budget: u32) -> Config {
    let mut cfg = config(month_budget);
    cfg.export.shaping.mode = ShapingMode::Reminder;
    cfg
}

/// Day cell with `(child, session text)` bookings.
pub fn day(label: &str, bookings: &[(&str, &str)]) -> DayCell {
    DayCell {
        date_label: label.to_string(),
        bookings: bookings.iter().map(|(child, time)| BookingElement::new(*child, *time)).collect(),
    }
}
