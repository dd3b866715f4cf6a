//! Booking shaper
//!
//! Turns a merged booking into the event that will be exported. The booked
//! window is always preserved in `original_start`/`original_end` and in the
//! description, whichever event window is chosen.

use bookingcal_domain::constants::DEFAULT_DESCRIPTION_PREFIX;
use bookingcal_domain::{
    format_range_12, BookingCalError, ExportConfig, ExportEvent, MergedBooking, Result,
    ShapingConfig, ShapingMode,
};
use chrono::{Duration, NaiveTime};

/// How the exported event window is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapingPolicy {
    /// Event covers the booked window.
    Literal,
    /// Event starts at a fixed time of day on the booking's date.
    Reminder { at: NaiveTime, duration: Duration },
}

impl ShapingPolicy {
    /// # Errors
    /// `Config` if the reminder time is not `HH:MM` or the duration is zero.
    pub fn from_config(shaping: &ShapingConfig) -> Result<Self> {
        match shaping.mode {
            ShapingMode::Literal => Ok(Self::Literal),
            ShapingMode::Reminder => {
                let at = NaiveTime::parse_from_str(shaping.reminder_time.trim(), "%H:%M")
                    .map_err(|e| {
                        BookingCalError::Config(format!(
                            "reminder time {:?} is not HH:MM: {e}",
                            shaping.reminder_time
                        ))
                    })?;
                if shaping.reminder_duration_minutes == 0 {
                    return Err(BookingCalError::Config(
                        "reminder duration must be at least one minute".into(),
                    ));
                }
                let duration = Duration::minutes(i64::from(shaping.reminder_duration_minutes));
                Ok(Self::Reminder { at, duration })
            }
        }
    }
}

/// Shapes merged bookings into export events.
#[derive(Debug, Clone)]
pub struct BookingShaper {
    policy: ShapingPolicy,
    include_time_range: bool,
    description_prefix: String,
}

impl BookingShaper {
    pub fn new(policy: ShapingPolicy) -> Self {
        Self {
            policy,
            include_time_range: true,
            description_prefix: DEFAULT_DESCRIPTION_PREFIX.to_string(),
        }
    }

    /// # Errors
    /// Propagates [`ShapingPolicy::from_config`] failures.
    pub fn from_config(export: &ExportConfig) -> Result<Self> {
        Ok(Self::new(ShapingPolicy::from_config(&export.shaping)?)
            .with_time_range(export.summary_includes_time_range)
            .with_description_prefix(export.description_prefix.clone()))
    }

    /// Append `9am-5pm` to summaries.
    pub fn with_time_range(mut self, enabled: bool) -> Self {
        self.include_time_range = enabled;
        self
    }

    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    pub fn policy(&self) -> ShapingPolicy {
        self.policy
    }

    pub fn shape(&self, booking: &MergedBooking) -> ExportEvent {
        let original_start = booking.start.time();
        let original_end = booking.end.time();

        let (event_start, event_end) = match self.policy {
            ShapingPolicy::Literal => (booking.start, booking.end),
            ShapingPolicy::Reminder { at, duration } => {
                let start = booking.date().and_time(at);
                (start, start + duration)
            }
        };

        let summary = if self.include_time_range {
            format!(
                "{} {}",
                booking.child_identifier,
                format_range_12(original_start, original_end)
            )
        } else {
            booking.child_identifier.clone()
        };

        let description = format!(
            "{}: {} ({}-{})",
            self.description_prefix,
            booking.child_identifier,
            original_start.format("%H:%M"),
            original_end.format("%H:%M"),
        );

        ExportEvent { summary, event_start, event_end, description, original_start, original_end }
    }
}
