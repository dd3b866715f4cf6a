//! # BookingCal CLI
//!
//! Process bootstrap for the `bookingcal` binary: argument parsing,
//! configuration overrides, the browser session scope and the run summary.

pub mod args;
pub mod context;
pub mod summary;

pub use args::Args;
pub use context::RunContext;
pub use summary::render_summary;
