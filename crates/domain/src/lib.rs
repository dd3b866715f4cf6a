//! # BookingCal Domain
//!
//! Business domain types and models for BookingCal.
//!
//! This crate contains:
//! - Booking data types (RawSession, MergedBooking, ExportEvent, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Pure parsing helpers for calendar header, day and time labels
//!
//! ## Architecture
//! - No dependencies on other BookingCal crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::month_label::{
    month_from_abbrev, normalize_month_label, parse_month_header, resolve_day_label,
};
pub use utils::hours::{format_hour_12, format_range_12};
pub use utils::time_range::parse_session_time;
