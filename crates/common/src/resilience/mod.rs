//! Resilience helpers for talking to slow, asynchronously rendered sources
//!
//! Every wait in the scraper is bounded: a [`Poller`] sleeps at a fixed
//! interval until its deadline passes, after which callers fall back to a
//! degraded path instead of hanging.

pub mod poll;

pub use poll::{PollConfig, PollError, Poller};
