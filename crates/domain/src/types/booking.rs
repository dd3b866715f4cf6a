//! Booking records as they move through the extraction pipeline

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One booking element read from a day cell.
///
/// Lives only for the processing of a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSession {
    pub child_identifier: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub calendar_date: NaiveDate,
}

impl RawSession {
    pub fn new(
        child_identifier: impl Into<String>,
        calendar_date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self { child_identifier: child_identifier.into(), start, end, calendar_date }
    }
}

/// A booking window after contiguous sessions for the same child have been
/// coalesced.
///
/// Within one calendar day, two entries for the same identifier never touch
/// or overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedBooking {
    pub child_identifier: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl MergedBooking {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// A calendar event ready for export.
///
/// `event_start`/`event_end` may be a reminder window; `original_start` and
/// `original_end` always carry the booked session and feed deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEvent {
    pub summary: String,
    pub event_start: NaiveDateTime,
    pub event_end: NaiveDateTime,
    pub description: String,
    pub original_start: NaiveTime,
    pub original_end: NaiveTime,
}

impl ExportEvent {
    /// `YYYY-MM` of the event start, the partition key for monthly export.
    pub fn month_key(&self) -> String {
        self.event_start.format("%Y-%m").to_string()
    }
}
