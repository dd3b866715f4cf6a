//! # BookingCal Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the rendered calendar page and for export storage
//! - The extraction pipeline (snapshot reading, day merging, pagination,
//!   event shaping)
//! - Monthly grouping, deduplication and iCalendar serialization
//! - The service that runs the whole pipeline once
//!
//! ## Architecture Principles
//! - Only depends on `bookingcal-common` and `bookingcal-domain`
//! - No browser, HTTP or filesystem code
//! - All external collaborators via traits

pub mod calendar_ports;
pub mod export;
pub mod export_ports;
pub mod extraction;
pub mod service;

pub use calendar_ports::{BookingElement, CalendarSurface, DayCell};
pub use export::{CalendarSettings, MonthlyExport, MonthlyExportBuilder};
pub use export_ports::{ExportDocument, ExportSink};
pub use extraction::{
    merge_day, BookingShaper, PaginationController, PaginationOutcome, PaginationState,
    ShapingPolicy, SnapshotReader,
};
pub use service::BookingExportService;
