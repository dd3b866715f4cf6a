//! Common utilities shared across BookingCal crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: side-effect free helpers (duration formatting)
//! - `runtime`: async infrastructure (bounded polling on the tokio clock)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod time;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

#[cfg(feature = "runtime")]
pub use resilience::{PollConfig, PollError, Poller};
#[cfg(feature = "foundation")]
pub use time::format_duration;
