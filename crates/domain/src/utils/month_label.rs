//! Month header and day label interpretation
//!
//! The calendar header reads `Bookings - Jan 2025`. Day cells carry either a
//! bare day number (`14`) for the displayed month, or a day number plus
//! abbreviation (`31 Dec`) for the spill-over days of adjacent months at the
//! edges of the grid.

use chrono::NaiveDate;

use crate::constants::MONTH_HEADER_PREFIX;
use crate::errors::ParseError;
use crate::types::DisplayedMonth;

const MONTH_ABBREVIATIONS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// 1-based month number for a three-letter abbreviation (`Jan` -> 1).
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    let abbrev = abbrev.trim();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbrev))
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

/// Canonical form of a header label: whitespace collapsed and the
/// `Bookings - ` prefix removed. Used both for parsing and for cycle
/// detection.
pub fn normalize_month_label(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.strip_prefix(MONTH_HEADER_PREFIX).map_or_else(|| collapsed.clone(), str::to_string)
}

/// Parse a header label into the displayed month.
///
/// # Errors
/// Fails unless the normalized label is exactly `MMM YYYY` with a known
/// abbreviation and a numeric year.
pub fn parse_month_header(raw: &str) -> Result<DisplayedMonth, ParseError> {
    let label = normalize_month_label(raw);
    let tokens: Vec<&str> = label.split(' ').filter(|t| !t.is_empty()).collect();
    let [abbrev, year] = tokens.as_slice() else {
        return Err(ParseError::MalformedHeader(raw.to_string()));
    };

    let month =
        month_from_abbrev(abbrev).ok_or_else(|| ParseError::UnknownMonth((*abbrev).to_string()))?;
    let year = year.parse::<i32>().map_err(|_| ParseError::InvalidYear((*year).to_string()))?;

    Ok(DisplayedMonth::new(year, month))
}

/// Resolve a day cell label against the displayed month.
///
/// A December day shown in a January view belongs to the previous year, and
/// a January day shown in a December view to the next. An unrecognised
/// abbreviation is treated as the displayed month.
///
/// # Errors
/// Fails when the label is not `D` or `D MMM`, or names a day that does not
/// exist in the resolved month.
pub fn resolve_day_label(displayed: DisplayedMonth, label: &str) -> Result<NaiveDate, ParseError> {
    let tokens: Vec<&str> = label.split_whitespace().collect();
    let (day, label_month) = match tokens.as_slice() {
        [day] => (*day, displayed.month),
        [day, abbrev] => (*day, month_from_abbrev(abbrev).unwrap_or(displayed.month)),
        _ => return Err(ParseError::MalformedDayLabel(label.to_string())),
    };
    let day = day.parse::<u32>().map_err(|_| ParseError::MalformedDayLabel(label.to_string()))?;

    let year = match (label_month, displayed.month) {
        (12, 1) => displayed.year.checked_sub(1),
        (1, 12) => displayed.year.checked_add(1),
        _ => Some(displayed.year),
    }
    .ok_or(ParseError::InvalidDate { year: displayed.year, month: label_month, day })?;

    NaiveDate::from_ymd_opt(year, label_month, day).ok_or(ParseError::InvalidDate {
        year,
        month: label_month,
        day,
    })
}
