//! Human-readable duration formatting for run summaries

use std::time::Duration;

/// Format a duration as `1h 2m 5s`, dropping leading zero units.
///
/// Sub-second durations are shown in milliseconds.
///
/// ```
/// # #[cfg(feature = "foundation")]
/// # {
/// use std::time::Duration;
///
/// use bookingcal_common::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
/// # }
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        return format!("{}ms", duration.as_millis());
    }

    let units = [(total / 3600, "h"), ((total % 3600) / 60, "m"), (total % 60, "s")];
    let mut parts = Vec::with_capacity(units.len());
    for (value, suffix) in units {
        if value > 0 || !parts.is_empty() {
            parts.push(format!("{value}{suffix}"));
        }
    }
    parts.join(" ")
}
