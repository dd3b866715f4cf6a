//! Domain type definitions

pub mod booking;
pub mod calendar;
pub mod report;

pub use booking::{ExportEvent, MergedBooking, RawSession};
pub use calendar::{DaySnapshot, DisplayedMonth, MonthBucket, MonthSnapshot};
pub use report::{AbortReason, DoneReason, MonthExportSummary, RunReport, Termination};
