//! End-of-run summary shown on stdout

use std::path::Path;
use std::time::Duration;

use bookingcal_common::format_duration;
use bookingcal_domain::RunReport;

const IMPORT_STEPS: [&str; 6] = [
    "Open https://calendar.google.com",
    "Settings (gear icon) > Settings > Import & export",
    "Select file from your computer",
    "Pick the .ics files (several can be selected at once)",
    "Choose the calendar to import into",
    "Click Import",
];

/// Render the report as plain text, one line per item.
pub fn render_summary(report: &RunReport, output_dir: &Path, elapsed: Duration) -> String {
    let mut lines = vec![format!(
        "Visited {} month(s): {}",
        report.months_visited.len(),
        if report.months_visited.is_empty() {
            "-".to_string()
        } else {
            report.months_visited.join(", ")
        }
    )];
    lines.push(format!("Pagination: {}", report.termination));

    if report.files.is_empty() {
        lines.push("No calendar files written.".to_string());
    } else {
        lines.push(format!("Created {} file(s):", report.files.len()));
        for file in &report.files {
            lines.push(format!(
                "  - {} ({}: {} event(s), {} duplicate(s) removed)",
                file.file_name, file.display_name, file.events_written, file.duplicates_removed
            ));
        }
        lines.push(format!(
            "Total: {} event(s) written, {} duplicate(s) removed",
            report.events_written(),
            report.duplicates_removed()
        ));
        let location = std::fs::canonicalize(output_dir).unwrap_or_else(|_| output_dir.to_path_buf());
        lines.push(format!("Location: {}", location.display()));
        lines.push(String::new());
        lines.push("To import into Google Calendar:".to_string());
        lines.extend(IMPORT_STEPS.iter().enumerate().map(|(i, step)| format!("  {}. {step}", i + 1)));
    }

    if !report.remarks.is_empty() {
        lines.push(String::new());
        lines.extend(report.remarks.iter().map(|remark| format!("Note: {remark}")));
    }

    lines.push(format!("Finished in {}", format_duration(elapsed)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use bookingcal_domain::{AbortReason, DoneReason, MonthExportSummary, Termination};

    use super::*;

    fn file(month: &str, written: usize, dupes: usize) -> MonthExportSummary {
        MonthExportSummary {
            month_key: "2025-01".into(),
            display_name: format!("2025 {month}"),
            file_name: format!("parentzone_bookings_2025_{month}.ics"),
            location: format!("./parentzone_bookings_2025_{month}.ics"),
            events_written: written,
            duplicates_removed: dupes,
        }
    }

    #[test]
    fn lists_files_counts_and_import_steps() {
        let report = RunReport {
            months_visited: vec!["Jan 2025".into(), "Feb 2025".into()],
            events_collected: 5,
            termination: Termination::Done(DoneReason::BudgetExhausted),
            files: vec![file("January", 3, 1), file("February", 1, 0)],
            remarks: Vec::new(),
        };

        let text = render_summary(&report, Path::new("."), Duration::from_secs(75));

        assert!(text.contains("Visited 2 month(s): Jan 2025, Feb 2025"));
        assert!(text.contains("parentzone_bookings_2025_January.ics (2025 January: 3 event(s), 1 duplicate(s) removed)"));
        assert!(text.contains("Total: 4 event(s) written, 1 duplicate(s) removed"));
        assert!(text.contains("Google Calendar"));
        assert!(text.ends_with("Finished in 1m 15s"));
    }

    #[test]
    fn empty_run_shows_remarks_without_import_steps() {
        let report = RunReport {
            months_visited: Vec::new(),
            events_collected: 0,
            termination: Termination::Aborted(AbortReason::NextControlMissing),
            files: Vec::new(),
            remarks: vec!["No bookings found.".into()],
        };

        let text = render_summary(&report, Path::new("."), Duration::from_millis(250));

        assert!(text.contains("Visited 0 month(s): -"));
        assert!(text.contains("No calendar files written."));
        assert!(text.contains("Note: No bookings found."));
        assert!(!text.contains("Google Calendar"));
    }
}
