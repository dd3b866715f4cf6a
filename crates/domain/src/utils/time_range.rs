//! Session time range parsing (`9:00 - 17:30`)

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;

static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})").expect("valid time range regex")
});

/// Extract the first `H:MM - H:MM` range (24-hour) from session text.
///
/// Surrounding text is ignored, so `Morning 8:00 - 12:30` parses.
///
/// # Errors
/// `MalformedTimeRange` when no range is present or the end precedes the
/// start; `InvalidTime` when a matched value is not a real time of day.
pub fn parse_session_time(text: &str) -> Result<(NaiveTime, NaiveTime), ParseError> {
    let caps =
        TIME_RANGE.captures(text).ok_or_else(|| ParseError::MalformedTimeRange(text.to_string()))?;

    let time_at = |hour_idx: usize, minute_idx: usize| -> Result<NaiveTime, ParseError> {
        let hour = &caps[hour_idx];
        let minute = &caps[minute_idx];
        let invalid = || ParseError::InvalidTime(format!("{hour}:{minute}"));
        let h = hour.parse::<u32>().map_err(|_| invalid())?;
        let m = minute.parse::<u32>().map_err(|_| invalid())?;
        NaiveTime::from_hms_opt(h, m, 0).ok_or_else(invalid)
    };

    let start = time_at(1, 2)?;
    let end = time_at(3, 4)?;
    if end < start {
        return Err(ParseError::MalformedTimeRange(text.to_string()));
    }
    Ok((start, end))
}
