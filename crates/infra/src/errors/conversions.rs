//! Conversions from external infrastructure errors into domain errors.

use bookingcal_domain::BookingCalError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BookingCalError);

impl From<InfraError> for BookingCalError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BookingCalError> for InfraError {
    fn from(value: BookingCalError) -> Self {
        Self(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BookingCalError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        if err.is_timeout() {
            return Self(BookingCalError::Browser("WebDriver request timed out".into()));
        }
        if err.is_connect() {
            return Self(BookingCalError::Browser(
                "could not connect to the WebDriver endpoint; is chromedriver running?".into(),
            ));
        }
        if err.is_decode() {
            return Self(BookingCalError::Browser(format!("malformed WebDriver response: {err}")));
        }
        if let Some(status) = err.status() {
            let message = format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            );
            return Self(match status.as_u16() {
                404 => BookingCalError::NotFound(message),
                400..=499 => BookingCalError::InvalidInput(message),
                _ => BookingCalError::Browser(message),
            });
        }
        Self(BookingCalError::Browser(err.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → BookingCalError */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        Self(match err.kind() {
            ErrorKind::NotFound => BookingCalError::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => {
                BookingCalError::Io(format!("permission denied: {err}"))
            }
            _ => BookingCalError::Io(err.to_string()),
        })
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → BookingCalError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        Self(BookingCalError::Parse(format!("invalid JSON: {err}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(err: toml::de::Error) -> Self {
        Self(BookingCalError::Config(format!("invalid TOML: {err}")))
    }
}
