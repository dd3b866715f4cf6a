//! iCalendar document serialization
//!
//! Produces the fixed line layout consumed by calendar importers. Lines are
//! joined with `\n` and the document ends at `END:VCALENDAR`.

use bookingcal_domain::{DisplayedMonth, ExportEvent};
use chrono::{DateTime, Utc};

use super::builder::CalendarSettings;

const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";
const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Escape a TEXT value (RFC 5545 section 3.3.11).
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

/// Stable per-file identifier from the booking date, original start and
/// position.
pub fn event_uid(settings: &CalendarSettings, event: &ExportEvent, index: usize) -> String {
    format!(
        "{}-{}{}-{}@{}",
        settings.uid_prefix,
        event.event_start.date().format("%Y%m%d"),
        event.original_start.format("%H%M%S"),
        index,
        settings.uid_domain
    )
}

/// Render one month's calendar document.
pub fn render_calendar(
    settings: &CalendarSettings,
    month: DisplayedMonth,
    events: &[ExportEvent],
    dtstamp: DateTime<Utc>,
) -> String {
    let stamp = dtstamp.format(UTC_FORMAT).to_string();
    let mut lines = Vec::with_capacity(8 + events.len() * 9);

    lines.push("BEGIN:VCALENDAR".to_string());
    lines.push("VERSION:2.0".to_string());
    lines.push(format!("PRODID:{}", settings.product_id));
    lines.push("CALSCALE:GREGORIAN".to_string());
    lines.push("METHOD:PUBLISH".to_string());
    lines.push(format!(
        "X-WR-CALNAME:{}",
        escape_text(&format!("{} {}", settings.calendar_name_prefix, month.display_name()))
    ));
    lines.push(format!("X-WR-TIMEZONE:{}", settings.timezone));

    for (index, event) in events.iter().enumerate() {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}", event_uid(settings, event, index)));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("DTSTART:{}", event.event_start.format(LOCAL_FORMAT)));
        lines.push(format!("DTEND:{}", event.event_end.format(LOCAL_FORMAT)));
        lines.push(format!("SUMMARY:{}", escape_text(&event.summary)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&event.description)));
        lines.push("STATUS:CONFIRMED".to_string());
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    lines.join("\n")
}
