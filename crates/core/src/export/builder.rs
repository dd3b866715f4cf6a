//! Monthly export builder
//!
//! Partitions events by the calendar month of their start, removes
//! duplicates within each month and renders one document per month.

use std::collections::{BTreeMap, HashSet};

use bookingcal_domain::constants::{
    DEFAULT_CALENDAR_NAME_PREFIX, DEFAULT_FILE_PREFIX, DEFAULT_PRODUCT_ID, DEFAULT_TIMEZONE,
    DEFAULT_UID_DOMAIN, DEFAULT_UID_PREFIX, ICS_EXTENSION,
};
use bookingcal_domain::{DisplayedMonth, ExportConfig, ExportEvent, MonthBucket};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;

use super::ics::render_calendar;
use crate::export_ports::ExportDocument;

/// Naming and header values written into every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    pub file_prefix: String,
    pub calendar_name_prefix: String,
    pub timezone: String,
    pub product_id: String,
    pub uid_prefix: String,
    pub uid_domain: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            calendar_name_prefix: DEFAULT_CALENDAR_NAME_PREFIX.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_prefix: DEFAULT_UID_PREFIX.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
        }
    }
}

impl From<&ExportConfig> for CalendarSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            file_prefix: config.file_prefix.clone(),
            calendar_name_prefix: config.calendar_name_prefix.clone(),
            timezone: config.timezone.clone(),
            product_id: config.product_id.clone(),
            uid_prefix: config.uid_prefix.clone(),
            uid_domain: config.uid_domain.clone(),
        }
    }
}

impl CalendarSettings {
    /// `<prefix>_<YYYY>_<MonthName>.ics`
    pub fn file_name(&self, month: DisplayedMonth) -> String {
        format!("{}_{}_{}.{ICS_EXTENSION}", self.file_prefix, month.year, month.month_name())
    }
}

/// One month's deduplicated events and rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyExport {
    pub bucket: MonthBucket,
    pub document: ExportDocument,
    pub duplicates_removed: usize,
}

impl MonthlyExport {
    pub fn events_written(&self) -> usize {
        self.bucket.events.len()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct DedupKey<'a> {
    summary: &'a str,
    date: NaiveDate,
    original_start: NaiveTime,
    original_end: NaiveTime,
}

impl<'a> DedupKey<'a> {
    fn of(event: &'a ExportEvent) -> Self {
        Self {
            summary: &event.summary,
            date: event.event_start.date(),
            original_start: event.original_start,
            original_end: event.original_end,
        }
    }
}

/// Builds per-month calendar documents
#[derive(Debug, Clone)]
pub struct MonthlyExportBuilder {
    settings: CalendarSettings,
    dtstamp: DateTime<Utc>,
}

impl MonthlyExportBuilder {
    /// `dtstamp` is written to every event; capture it once per run.
    pub fn new(settings: CalendarSettings, dtstamp: DateTime<Utc>) -> Self {
        Self { settings, dtstamp }
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Group events by `YYYY-MM` of their start, in month order, keeping
    /// input order within a month.
    pub fn partition(events: &[ExportEvent]) -> Vec<MonthBucket> {
        Self::group(events)
            .into_iter()
            .map(|(month, events)| MonthBucket {
                month_key: month.key(),
                display_name: month.display_name(),
                events,
            })
            .collect()
    }

    /// Drop events whose (summary, date, original window) was already seen.
    ///
    /// Returns the surviving events in first-seen order and the number
    /// removed.
    pub fn dedupe(events: &[ExportEvent]) -> (Vec<ExportEvent>, usize) {
        let mut seen = HashSet::with_capacity(events.len());
        let unique: Vec<ExportEvent> =
            events.iter().filter(|e| seen.insert(DedupKey::of(*e))).cloned().collect();
        let removed = events.len() - unique.len();
        (unique, removed)
    }

    pub fn build(&self, events: &[ExportEvent]) -> Vec<MonthlyExport> {
        Self::group(events)
            .into_iter()
            .map(|(month, month_events)| {
                let (unique, duplicates_removed) = Self::dedupe(&month_events);
                let contents = render_calendar(&self.settings, month, &unique, self.dtstamp);
                debug!(
                    month = %month.key(),
                    events = unique.len(),
                    duplicates_removed,
                    "export.month_built"
                );

                MonthlyExport {
                    document: ExportDocument {
                        month_key: month.key(),
                        file_name: self.settings.file_name(month),
                        contents,
                    },
                    bucket: MonthBucket {
                        month_key: month.key(),
                        display_name: month.display_name(),
                        events: unique,
                    },
                    duplicates_removed,
                }
            })
            .collect()
    }

    fn group(events: &[ExportEvent]) -> BTreeMap<DisplayedMonth, Vec<ExportEvent>> {
        let mut months: BTreeMap<DisplayedMonth, Vec<ExportEvent>> = BTreeMap::new();
        for event in events {
            months
                .entry(DisplayedMonth::from_date(event.event_start.date()))
                .or_default()
                .push(event.clone());
        }
        months
    }
}
