use std::sync::Mutex;

use async_trait::async_trait;
use bookingcal_core::{CalendarSurface, DayCell};
use bookingcal_domain::Result as DomainResult;

/// One month as the scripted page renders it.
#[derive(Debug, Clone)]
pub struct ScriptedMonth {
    pub header: String,
    pub cells: Vec<DayCell>,
}

impl ScriptedMonth {
    pub fn new(header: &str, cells: Vec<DayCell>) -> Self {
        Self { header: header.to_string(), cells }
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    index: usize,
    clicks: u32,
    label_reads: u32,
}

/// In-memory `CalendarSurface` that walks a fixed list of months.
///
/// By default clicking "next" past the last month leaves the page where it
/// is, so the header stops changing.
#[derive(Debug)]
pub struct ScriptedSurface {
    months: Vec<ScriptedMonth>,
    state: Mutex<SurfaceState>,
    wraps: bool,
    next_control: bool,
    frozen: bool,
    hidden_header_reads: u32,
}

impl ScriptedSurface {
    pub fn new(months: Vec<ScriptedMonth>) -> Self {
        Self {
            months,
            state: Mutex::new(SurfaceState::default()),
            wraps: false,
            next_control: true,
            frozen: false,
            hidden_header_reads: 0,
        }
    }

    /// After the last month, navigation returns to the first.
    pub fn wrapping(mut self) -> Self {
        self.wraps = true;
        self
    }

    /// The page has no next-month control.
    pub fn without_next_control(mut self) -> Self {
        self.next_control = false;
        self
    }

    /// Clicks are accepted but the page never changes.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// The header is reported missing for the first `reads` label reads.
    pub fn with_hidden_header_reads(mut self, reads: u32) -> Self {
        self.hidden_header_reads = reads;
        self
    }

    pub fn clicks(&self) -> u32 {
        self.state.lock().unwrap().clicks
    }
}

#[async_trait]
impl CalendarSurface for ScriptedSurface {
    async fn current_month_label(&self) -> DomainResult<Option<String>> {
        let mut state = self.state.lock().unwrap();
        state.label_reads += 1;
        if state.label_reads <= self.hidden_header_reads {
            return Ok(None);
        }
        Ok(self.months.get(state.index).map(|m| m.header.clone()))
    }

    async fn day_cells(&self) -> DomainResult<Vec<DayCell>> {
        let state = self.state.lock().unwrap();
        Ok(self.months.get(state.index).map(|m| m.cells.clone()).unwrap_or_default())
    }

    async fn click_next_month(&self) -> DomainResult<bool> {
        if !self.next_control {
            return Ok(false);
        }
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        if self.frozen {
            return Ok(true);
        }
        if state.index + 1 < self.months.len() {
            state.index += 1;
        } else if self.wraps {
            state.index = 0;
        }
        Ok(true)
    }
}
