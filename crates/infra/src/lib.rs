//! # BookingCal Infrastructure
//!
//! Adapters for the ports defined in `bookingcal-core`.
//!
//! This crate contains:
//! - Configuration loading (environment, `.env`, TOML/JSON files)
//! - A W3C WebDriver client over HTTP and the bookings page adapter
//! - The login flow
//! - Filesystem export of calendar documents
//! - Tracing subscriber setup
//! - Conversions from third-party errors into domain errors

pub mod config;
pub mod errors;
pub mod export;
pub mod http;
pub mod observability;
pub mod webdriver;

pub use config::loader;
pub use errors::InfraError;
pub use export::FileExportSink;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{init_tracing, LogFormat};
pub use webdriver::{
    BrowserOptions, LoginFlow, Locator, PageSelectors, ParentZonePage, WebDriverSession,
};
