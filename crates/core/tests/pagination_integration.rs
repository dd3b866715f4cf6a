//! Integration tests for month pagination
//!
//! Drives `PaginationController` against scripted pages on tokio's paused
//! clock, so every bounded wait resolves instantly and deterministically.

mod support;

use std::time::Duration;

use bookingcal_core::PaginationController;
use bookingcal_domain::{AbortReason, DoneReason, Termination};
use support::surface::{ScriptedMonth, ScriptedSurface};
use support::{config, day};
use tokio::time::Instant;

fn month(header: &str) -> ScriptedMonth {
    ScriptedMonth::new(header, vec![day("6", &[("Ada", "9:00 - 17:00")])])
}

fn controller(budget: u32) -> PaginationController {
    PaginationController::from_config(&config(budget)).unwrap()
}

/// Traversal stops once the month budget is used, without clicking past the
/// last budgeted month.
#[tokio::test(start_paused = true)]
async fn test_budget_limits_months_visited() {
    let surface = ScriptedSurface::new(vec![
        month("Bookings - Jan 2025"),
        month("Bookings - Feb 2025"),
        month("Bookings - Mar 2025"),
        month("Bookings - Apr 2025"),
    ]);

    let outcome = controller(3).run(&surface).await;

    assert_eq!(outcome.months_visited, ["Jan 2025", "Feb 2025", "Mar 2025"]);
    assert_eq!(outcome.termination, Termination::Done(DoneReason::BudgetExhausted));
    assert_eq!(outcome.events.len(), 3);
    assert_eq!(surface.clicks(), 2);
}

/// A page that wraps back to an already-read month ends the run before the
/// budget is spent.
#[tokio::test(start_paused = true)]
async fn test_cycle_stops_traversal_early() {
    let surface =
        ScriptedSurface::new(vec![month("Bookings - Nov 2024"), month("Bookings - Dec 2024")])
            .wrapping();

    let outcome = controller(6).run(&surface).await;

    assert_eq!(outcome.months_visited, ["Nov 2024", "Dec 2024"]);
    assert_eq!(
        outcome.termination,
        Termination::Done(DoneReason::CycleDetected { label: "Nov 2024".into() })
    );
    assert_eq!(outcome.events.len(), 2);
}

/// Labels differing only in whitespace are the same month for cycle
/// detection.
#[tokio::test(start_paused = true)]
async fn test_cycle_detection_normalizes_labels() {
    let surface = ScriptedSurface::new(vec![
        month("Bookings - Jan 2025"),
        month("Bookings - Feb 2025"),
        month("Bookings  -  Jan   2025 "),
    ]);

    let outcome = controller(5).run(&surface).await;

    assert_eq!(outcome.months_visited.len(), 2);
    assert!(matches!(outcome.termination, Termination::Done(DoneReason::CycleDetected { .. })));
}

/// Without a next-month control the run aborts but keeps what it read.
#[tokio::test(start_paused = true)]
async fn test_missing_next_control_keeps_collected_events() {
    let surface = ScriptedSurface::new(vec![month("Bookings - Jan 2025")]).without_next_control();

    let outcome = controller(3).run(&surface).await;

    assert_eq!(outcome.termination, Termination::Aborted(AbortReason::NextControlMissing));
    assert_eq!(outcome.events.len(), 1);
}

/// A header that never changes after clicking aborts after the navigation
/// timeout.
#[tokio::test(start_paused = true)]
async fn test_unchanged_header_aborts_after_timeout() {
    let surface = ScriptedSurface::new(vec![month("Bookings - Jan 2025")]).frozen();
    let started = Instant::now();

    let outcome = controller(3).run(&surface).await;

    assert_eq!(
        outcome.termination,
        Termination::Aborted(AbortReason::HeaderUnchanged { label: "Jan 2025".into() })
    );
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

/// Running out of months behaves like a frozen page.
#[tokio::test(start_paused = true)]
async fn test_last_month_without_successor_aborts() {
    let surface = ScriptedSurface::new(vec![month("Bookings - Jan 2025"), month("Bookings - Feb 2025")]);

    let outcome = controller(3).run(&surface).await;

    assert_eq!(outcome.months_visited, ["Jan 2025", "Feb 2025"]);
    assert!(outcome.termination.is_aborted());
    assert_eq!(outcome.events.len(), 2);
}

/// A header that renders late is picked up by the bounded wait.
#[tokio::test(start_paused = true)]
async fn test_late_header_is_awaited() {
    let surface = ScriptedSurface::new(vec![month("Bookings - Jan 2025")]).with_hidden_header_reads(3);
    let started = Instant::now();

    let outcome = controller(1).run(&surface).await;

    assert_eq!(outcome.months_visited, ["Jan 2025"]);
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(started.elapsed(), Duration::from_millis(750));
}

/// A header that never renders waits the full bound plus the settle delay,
/// then gives up with nothing collected.
#[tokio::test(start_paused = true)]
async fn test_missing_header_yields_no_events() {
    let surface = ScriptedSurface::new(Vec::new());
    let started = Instant::now();

    let outcome = controller(3).run(&surface).await;

    assert!(matches!(
        outcome.termination,
        Termination::Aborted(AbortReason::MonthUnreadable { .. })
    ));
    assert!(outcome.events.is_empty());
    assert!(outcome.months_visited.is_empty());
    assert_eq!(started.elapsed(), Duration::from_secs(20));
}

/// An unparseable header is visited but contributes no events.
#[tokio::test(start_paused = true)]
async fn test_unparseable_header_reads_empty_month() {
    let surface = ScriptedSurface::new(vec![month("Bookings - Foo 2025"), month("Bookings - Feb 2025")]);

    let outcome = controller(2).run(&surface).await;

    assert_eq!(outcome.months_visited, ["Foo 2025", "Feb 2025"]);
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.termination, Termination::Done(DoneReason::BudgetExhausted));
}
