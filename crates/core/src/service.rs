//! Booking export service - runs the pipeline once
//!
//! Paginate, build the monthly documents, then hand each one to the sink.
//! Nothing in here aborts the run: failures are logged and surfaced as
//! remarks on the report so whatever was collected still gets exported.

use std::sync::Arc;

use bookingcal_domain::{Config, MonthExportSummary, Result, RunReport, Termination};
use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use crate::calendar_ports::CalendarSurface;
use crate::export::{CalendarSettings, MonthlyExportBuilder};
use crate::export_ports::ExportSink;
use crate::extraction::PaginationController;

/// Remark attached when a run collects nothing.
pub const NO_BOOKINGS_REMARK: &str = "No bookings found. Likely causes: the login did not \
     complete, the calendar page had not finished rendering, or the visited months have no \
     bookings.";

/// Booking export service
pub struct BookingExportService {
    controller: PaginationController,
    builder: MonthlyExportBuilder,
    sink: Arc<dyn ExportSink>,
}

impl BookingExportService {
    pub fn new(
        controller: PaginationController,
        builder: MonthlyExportBuilder,
        sink: Arc<dyn ExportSink>,
    ) -> Self {
        Self { controller, builder, sink }
    }

    /// Wire the pipeline from configuration.
    ///
    /// # Errors
    /// `Config` when wait bounds or shaping settings are unusable.
    pub fn from_config(
        config: &Config,
        sink: Arc<dyn ExportSink>,
        dtstamp: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self::new(
            PaginationController::from_config(config)?,
            MonthlyExportBuilder::new(CalendarSettings::from(&config.export), dtstamp),
            sink,
        ))
    }

    /// Extract bookings from `surface` and write one document per month.
    #[instrument(skip_all, fields(budget = self.controller.month_budget()))]
    pub async fn run(&self, surface: &dyn CalendarSurface) -> RunReport {
        let outcome = self.controller.run(surface).await;
        let mut remarks = Vec::new();

        if let Termination::Aborted(_) = &outcome.termination {
            remarks.push(outcome.termination.to_string());
        }
        if outcome.events.is_empty() {
            warn!(months = outcome.months_visited.len(), "export.no_bookings_found");
            remarks.push(NO_BOOKINGS_REMARK.to_string());
        }

        let mut files = Vec::new();
        for export in self.builder.build(&outcome.events) {
            let document = &export.document;
            match self.sink.write_document(document).await {
                Ok(location) => {
                    info!(
                        month = %document.month_key,
                        file = %document.file_name,
                        events_written = export.events_written(),
                        duplicates_removed = export.duplicates_removed,
                        "export.month_written"
                    );
                    files.push(MonthExportSummary {
                        month_key: export.bucket.month_key.clone(),
                        display_name: export.bucket.display_name.clone(),
                        file_name: document.file_name.clone(),
                        location,
                        events_written: export.events_written(),
                        duplicates_removed: export.duplicates_removed,
                    });
                }
                Err(err) => {
                    error!(file = %document.file_name, error = %err, "export.write_failed");
                    remarks.push(format!("Failed to write {}: {err}", document.file_name));
                }
            }
        }

        RunReport {
            months_visited: outcome.months_visited,
            events_collected: outcome.events.len(),
            termination: outcome.termination,
            files,
            remarks,
        }
    }
}
