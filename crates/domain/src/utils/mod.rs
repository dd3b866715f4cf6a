//! Pure text parsing helpers for the calendar page

pub mod hours;
pub mod month_label;
pub mod time_range;
