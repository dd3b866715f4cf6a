//! Pagination controller
//!
//! Drives the snapshot reader across a bounded run of months. Each visited
//! month is read, merged and shaped before advancing. Every wait is bounded,
//! and a failure to advance only stops collection; events gathered so far are
//! kept.

use std::collections::HashSet;
use std::time::Duration;

use bookingcal_common::resilience::PollConfig;
use bookingcal_domain::{
    normalize_month_label, AbortReason, BookingCalError, Config, DoneReason, ExportEvent, Result,
    Termination,
};
use tracing::{debug, info, warn};

use super::merger::merge_day;
use super::reader::SnapshotReader;
use super::shaper::BookingShaper;
use crate::calendar_ports::CalendarSurface;

/// Controller state. `Done` and `Aborted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationState {
    Idle,
    ReadingMonth,
    Advancing,
    Done(DoneReason),
    Aborted(AbortReason),
}

/// Everything collected by one pagination run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOutcome {
    pub events: Vec<ExportEvent>,
    /// Normalized labels in visit order.
    pub months_visited: Vec<String>,
    pub termination: Termination,
}

#[derive(Debug, Default)]
struct RunState {
    visited: HashSet<String>,
    order: Vec<String>,
    events: Vec<ExportEvent>,
    months_read: u32,
}

/// Bounded month-by-month traversal
#[derive(Debug, Clone)]
pub struct PaginationController {
    reader: SnapshotReader,
    shaper: BookingShaper,
    month_budget: u32,
    navigation: PollConfig,
    post_navigation_delay: Duration,
}

impl PaginationController {
    pub fn new(
        reader: SnapshotReader,
        shaper: BookingShaper,
        month_budget: u32,
        navigation: PollConfig,
    ) -> Self {
        Self {
            reader,
            shaper,
            month_budget: month_budget.max(1),
            navigation,
            post_navigation_delay: Duration::ZERO,
        }
    }

    /// # Errors
    /// `Config` when wait bounds or shaping settings are unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let scraper = &config.scraper;
        let navigation = PollConfig::new(
            Duration::from_millis(scraper.navigation_poll_interval_ms),
            Duration::from_secs(scraper.navigation_timeout_secs),
        )
        .map_err(|e| BookingCalError::Config(e.to_string()))?;

        Ok(Self::new(
            SnapshotReader::from_config(config)?,
            BookingShaper::from_config(&config.export)?,
            scraper.month_budget,
            navigation,
        )
        .with_post_navigation_delay(Duration::from_millis(scraper.post_navigation_delay_ms)))
    }

    /// Pause after the header changes so the day cells can render.
    pub fn with_post_navigation_delay(mut self, delay: Duration) -> Self {
        self.post_navigation_delay = delay;
        self
    }

    pub fn month_budget(&self) -> u32 {
        self.month_budget
    }

    /// Visit months until the budget is spent, a cycle is seen, or
    /// navigation stops working.
    pub async fn run(&self, surface: &dyn CalendarSurface) -> PaginationOutcome {
        let mut run = RunState::default();
        let mut state = PaginationState::Idle;

        loop {
            debug!(?state, "pagination.state");
            state = match state {
                PaginationState::Idle => PaginationState::ReadingMonth,
                PaginationState::ReadingMonth => self.read_month(surface, &mut run).await,
                PaginationState::Advancing => self.advance(surface).await,
                PaginationState::Done(reason) => {
                    return Self::finish(run, Termination::Done(reason));
                }
                PaginationState::Aborted(reason) => {
                    return Self::finish(run, Termination::Aborted(reason));
                }
            };
        }
    }

    async fn read_month(
        &self,
        surface: &dyn CalendarSurface,
        run: &mut RunState,
    ) -> PaginationState {
        let Some(raw_label) = self.reader.await_header(surface).await else {
            warn!(months_read = run.months_read, "pagination.header_missing");
            return PaginationState::Aborted(AbortReason::MonthUnreadable {
                detail: "month header never appeared".to_string(),
            });
        };

        let label = normalize_month_label(&raw_label);
        if !run.visited.insert(label.clone()) {
            info!(month = %label, "pagination.cycle_detected");
            return PaginationState::Done(DoneReason::CycleDetected { label });
        }
        run.order.push(label.clone());

        let snapshot = self.reader.read(surface, &raw_label).await;
        let before = run.events.len();
        for day in &snapshot.days {
            for booking in merge_day(&day.sessions) {
                run.events.push(self.shaper.shape(&booking));
            }
        }
        run.months_read += 1;

        info!(
            month = %label,
            sessions = snapshot.session_count(),
            events = run.events.len() - before,
            months_read = run.months_read,
            budget = self.month_budget,
            "pagination.month_read"
        );

        if run.months_read >= self.month_budget {
            PaginationState::Done(DoneReason::BudgetExhausted)
        } else {
            PaginationState::Advancing
        }
    }

    async fn advance(&self, surface: &dyn CalendarSurface) -> PaginationState {
        let before = match surface.current_month_label().await {
            Ok(Some(label)) => normalize_month_label(&label),
            Ok(None) => {
                return PaginationState::Aborted(AbortReason::MonthUnreadable {
                    detail: "month header disappeared before navigating".to_string(),
                });
            }
            Err(err) => {
                return PaginationState::Aborted(AbortReason::NavigationFailed {
                    detail: err.to_string(),
                });
            }
        };

        match surface.click_next_month().await {
            Ok(true) => {}
            Ok(false) => {
                warn!(month = %before, "pagination.next_control_missing");
                return PaginationState::Aborted(AbortReason::NextControlMissing);
            }
            Err(err) => {
                warn!(month = %before, error = %err, "pagination.next_click_failed");
                return PaginationState::Aborted(AbortReason::NavigationFailed {
                    detail: err.to_string(),
                });
            }
        }

        let mut poller = self.navigation.start();
        loop {
            if let Ok(Some(label)) = surface.current_month_label().await {
                if normalize_month_label(&label) != before {
                    break;
                }
            }
            if !poller.tick().await {
                warn!(month = %before, attempts = poller.attempts(), "pagination.header_unchanged");
                return PaginationState::Aborted(AbortReason::HeaderUnchanged { label: before });
            }
        }

        tokio::time::sleep(self.post_navigation_delay).await;
        PaginationState::ReadingMonth
    }

    fn finish(run: RunState, termination: Termination) -> PaginationOutcome {
        info!(
            months = run.order.len(),
            events = run.events.len(),
            %termination,
            "pagination.finished"
        );
        PaginationOutcome { events: run.events, months_visited: run.order, termination }
    }
}
