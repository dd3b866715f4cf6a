//! Page snapshot reader
//!
//! Waits for the month header, then interprets the visible day cells. Text
//! that cannot be parsed is logged and skipped; a read never fails the run.

use std::time::Duration;

use bookingcal_common::resilience::PollConfig;
use bookingcal_domain::constants::DEFAULT_CHILD_IDENTIFIER;
use bookingcal_domain::{
    parse_month_header, parse_session_time, resolve_day_label, BookingCalError, Config,
    DaySnapshot, DisplayedMonth, MonthSnapshot, RawSession, Result,
};
use tracing::{debug, warn};

use crate::calendar_ports::{CalendarSurface, DayCell};

/// Reads one month of bookings from a [`CalendarSurface`].
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    header_wait: PollConfig,
    settle_delay: Duration,
    default_child: String,
}

impl SnapshotReader {
    pub fn new(header_wait: PollConfig, settle_delay: Duration) -> Self {
        Self { header_wait, settle_delay, default_child: DEFAULT_CHILD_IDENTIFIER.to_string() }
    }

    /// Build from the scraper wait bounds and the export's placeholder
    /// identifier.
    ///
    /// # Errors
    /// `Config` when the poll interval is unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let scraper = &config.scraper;
        let header_wait = PollConfig::new(
            Duration::from_millis(scraper.navigation_poll_interval_ms),
            Duration::from_secs(scraper.header_wait_secs),
        )
        .map_err(|e| BookingCalError::Config(e.to_string()))?;

        Ok(Self::new(header_wait, Duration::from_secs(scraper.header_settle_secs))
            .with_default_child(config.export.default_child_identifier.clone()))
    }

    /// Identifier used for booking elements without a child name.
    pub fn with_default_child(mut self, identifier: impl Into<String>) -> Self {
        self.default_child = identifier.into();
        self
    }

    /// Wait for the month header to be rendered and return its raw text.
    ///
    /// If the bounded wait expires, sleeps the settle delay and makes one last
    /// attempt. `None` means the header is still missing after that.
    pub async fn await_header(&self, surface: &dyn CalendarSurface) -> Option<String> {
        let mut poller = self.header_wait.start();
        loop {
            if let Some(label) = probe_header(surface).await {
                return Some(label);
            }
            if !poller.tick().await {
                break;
            }
        }

        warn!(
            waited_ms = u64::try_from(poller.elapsed().as_millis()).unwrap_or(u64::MAX),
            settle_ms = u64::try_from(self.settle_delay.as_millis()).unwrap_or(u64::MAX),
            "reader.header_wait_timed_out"
        );
        tokio::time::sleep(self.settle_delay).await;
        probe_header(surface).await
    }

    /// Read the displayed month whose header text is `label`.
    ///
    /// An unparseable header yields an empty snapshot.
    pub async fn read(&self, surface: &dyn CalendarSurface, label: &str) -> MonthSnapshot {
        let displayed = match parse_month_header(label) {
            Ok(displayed) => displayed,
            Err(err) => {
                warn!(label, error = %err, "reader.header_unparseable");
                return MonthSnapshot::empty(label);
            }
        };

        let days = match surface.day_cells().await {
            Ok(cells) => self.parse_cells(displayed, &cells),
            Err(err) => {
                warn!(label, error = %err, "reader.day_cells_unavailable");
                Vec::new()
            }
        };

        MonthSnapshot { label: label.to_string(), displayed: Some(displayed), days }
    }

    /// Interpret day cells against the displayed month.
    pub fn parse_cells(&self, displayed: DisplayedMonth, cells: &[DayCell]) -> Vec<DaySnapshot> {
        let mut days = Vec::with_capacity(cells.len());

        for cell in cells {
            let date_label = cell.date_label.trim();
            if date_label.is_empty() {
                continue;
            }
            let date = match resolve_day_label(displayed, date_label) {
                Ok(date) => date,
                Err(err) => {
                    warn!(date_label, error = %err, "reader.day_label_skipped");
                    continue;
                }
            };

            let mut sessions = Vec::with_capacity(cell.bookings.len());
            for booking in &cell.bookings {
                let Some(text) = non_empty(booking.session_time.as_deref()) else {
                    continue;
                };
                let child = non_empty(booking.child_name.as_deref())
                    .unwrap_or(self.default_child.as_str());

                match parse_session_time(text) {
                    Ok((start, end)) => sessions.push(RawSession::new(child, date, start, end)),
                    Err(err) => warn!(
                        %date,
                        child,
                        session_text = text,
                        error = %err,
                        "reader.session_skipped"
                    ),
                }
            }

            days.push(DaySnapshot { date, sessions });
        }

        days
    }
}

async fn probe_header(surface: &dyn CalendarSurface) -> Option<String> {
    match surface.current_month_label().await {
        Ok(Some(label)) if !label.trim().is_empty() => Some(label),
        Ok(_) => None,
        Err(err) => {
            debug!(error = %err, "reader.header_probe_failed");
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::calendar_ports::BookingElement;

    fn reader() -> SnapshotReader {
        let wait = PollConfig::from_millis(250, 1000).unwrap();
        SnapshotReader::new(wait, Duration::from_secs(1))
    }

    fn cell(label: &str, bookings: Vec<BookingElement>) -> DayCell {
        DayCell { date_label: label.to_string(), bookings }
    }

    #[test]
    fn parses_sessions_and_applies_placeholder() {
        let cells = vec![cell(
            "14",
            vec![
                BookingElement::new("Ada", "9:00 - 12:00"),
                BookingElement { child_name: None, session_time: Some("13:00 - 15:00".into()) },
            ],
        )];

        let days = reader().parse_cells(DisplayedMonth::new(2025, 1), &cells);

        assert_eq!(days.len(), 1);
        let sessions = &days[0].sessions;
        assert_eq!(sessions[0].child_identifier, "Ada");
        assert_eq!(sessions[0].start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(sessions[1].child_identifier, DEFAULT_CHILD_IDENTIFIER);
        assert_eq!(sessions[1].calendar_date, NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
    }

    #[test]
    fn skips_bad_text_without_dropping_the_day() {
        let cells = vec![
            cell("", vec![BookingElement::new("Ada", "9:00 - 12:00")]),
            cell("nonsense label here", vec![BookingElement::new("Ada", "9:00 - 12:00")]),
            cell(
                "31 Dec",
                vec![
                    BookingElement::new("Ada", "all day"),
                    BookingElement::new("Ada", "   "),
                    BookingElement::new("Ada", "8:00 - 9:00"),
                ],
            ),
        ];

        let days = reader().parse_cells(DisplayedMonth::new(2025, 1), &cells);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(days[0].sessions.len(), 1);
    }

    #[test]
    fn custom_placeholder_is_used() {
        let cells = vec![cell(
            "3",
            vec![BookingElement { child_name: Some("  ".into()), session_time: Some("9:00-10:00".into()) }],
        )];
        let days = reader()
            .with_default_child("Nursery")
            .parse_cells(DisplayedMonth::new(2025, 3), &cells);
        assert_eq!(days[0].sessions[0].child_identifier, "Nursery");
    }
}
