//! Rendered calendar page port
//!
//! The core never touches a browser. It sees the bookings page only through
//! this narrow capability interface, so every stage can be driven by
//! scripted snapshots in tests.

use async_trait::async_trait;
use bookingcal_domain::Result;

/// One booking element inside a day cell, as raw page text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingElement {
    pub child_name: Option<String>,
    pub session_time: Option<String>,
}

impl BookingElement {
    pub fn new(child_name: impl Into<String>, session_time: impl Into<String>) -> Self {
        Self { child_name: Some(child_name.into()), session_time: Some(session_time.into()) }
    }
}

/// One visible day cell of the month grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCell {
    /// `14` or `31 Dec`
    pub date_label: String,
    pub bookings: Vec<BookingElement>,
}

/// Trait for the paginated calendar view
#[async_trait]
pub trait CalendarSurface: Send + Sync {
    /// Raw header text (`Bookings - Jan 2025`), `None` while not rendered.
    async fn current_month_label(&self) -> Result<Option<String>>;

    /// Day cells of the displayed month grid.
    async fn day_cells(&self) -> Result<Vec<DayCell>>;

    /// Activate the next-month control.
    ///
    /// Returns `false` when no such control could be located.
    async fn click_next_month(&self) -> Result<bool>;
}
