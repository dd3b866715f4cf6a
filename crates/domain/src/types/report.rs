//! Run outcome reporting

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why pagination stopped normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoneReason {
    BudgetExhausted,
    /// The page showed a month that had already been read.
    CycleDetected { label: String },
}

/// Why pagination gave up early. Events already collected are still exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbortReason {
    MonthUnreadable { detail: String },
    NextControlMissing,
    HeaderUnchanged { label: String },
    NavigationFailed { detail: String },
}

/// Terminal state of a pagination run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Done(DoneReason),
    Aborted(AbortReason),
}

impl Termination {
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(DoneReason::BudgetExhausted) => f.write_str("month budget reached"),
            Self::Done(DoneReason::CycleDetected { label }) => {
                write!(f, "navigation wrapped back to {label}")
            }
            Self::Aborted(AbortReason::MonthUnreadable { detail }) => {
                write!(f, "stopped: could not read month header ({detail})")
            }
            Self::Aborted(AbortReason::NextControlMissing) => {
                f.write_str("stopped: next-month control not found")
            }
            Self::Aborted(AbortReason::HeaderUnchanged { label }) => {
                write!(f, "stopped: header stayed on {label} after navigating")
            }
            Self::Aborted(AbortReason::NavigationFailed { detail }) => {
                write!(f, "stopped: navigation failed ({detail})")
            }
        }
    }
}

/// Per-month export outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthExportSummary {
    pub month_key: String,
    pub display_name: String,
    pub file_name: String,
    /// Where the document ended up, as reported by the sink.
    pub location: String,
    pub events_written: usize,
    pub duplicates_removed: usize,
}

/// Summary of one complete run, printed at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub months_visited: Vec<String>,
    pub events_collected: usize,
    pub termination: Termination,
    pub files: Vec<MonthExportSummary>,
    pub remarks: Vec<String>,
}

impl RunReport {
    pub fn events_written(&self) -> usize {
        self.files.iter().map(|f| f.events_written).sum()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.files.iter().map(|f| f.duplicates_removed).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events_collected == 0
    }
}
