//! Month-level views of the calendar page and of the export

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

use super::booking::{ExportEvent, RawSession};

/// The month and year shown in the calendar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DisplayedMonth {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
}

impl DisplayedMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self { year: date.year(), month: date.month() }
    }

    /// Full English month name, e.g. `January`.
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("Unknown", |m| m.name())
    }

    /// `YYYY-MM`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// `YYYY MonthName`, e.g. `2025 January`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.year, self.month_name())
    }
}

/// Parsed sessions for one visible day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub sessions: Vec<RawSession>,
}

/// Everything read from one rendered month.
///
/// `displayed` is `None` when the header could not be parsed; such a
/// snapshot carries no days.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthSnapshot {
    pub label: String,
    pub displayed: Option<DisplayedMonth>,
    pub days: Vec<DaySnapshot>,
}

impl MonthSnapshot {
    pub fn empty(label: impl Into<String>) -> Self {
        Self { label: label.into(), displayed: None, days: Vec::new() }
    }

    pub fn session_count(&self) -> usize {
        self.days.iter().map(|d| d.sessions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.session_count() == 0
    }
}

/// Events for one `YYYY-MM` partition, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month_key: String,
    pub display_name: String,
    pub events: Vec<ExportEvent>,
}
