//! Booking extraction pipeline
//!
//! - [`reader`]: turns the rendered page into a [`MonthSnapshot`]
//! - [`merger`]: coalesces back-to-back sessions within a day
//! - [`shaper`]: derives exportable events from merged bookings
//! - [`pagination`]: drives the reader across a bounded run of months
//!
//! [`MonthSnapshot`]: bookingcal_domain::MonthSnapshot

pub mod merger;
pub mod pagination;
pub mod reader;
pub mod shaper;

pub use merger::merge_day;
pub use pagination::{PaginationController, PaginationOutcome, PaginationState};
pub use reader::SnapshotReader;
pub use shaper::{BookingShaper, ShapingPolicy};
