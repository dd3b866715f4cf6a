//! Monthly iCalendar export

pub mod builder;
pub mod ics;

pub use builder::{CalendarSettings, MonthlyExport, MonthlyExportBuilder};
pub use ics::escape_text;
