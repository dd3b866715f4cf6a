//! Observability infrastructure
//!
//! Structured logging through `tracing`. Events use dotted names
//! (`pagination.month_read`, `export.file_written`) so they can be filtered
//! with `RUST_LOG` and grouped in JSON output.

pub mod logging;

pub use logging::{init_tracing, LogFormat};
