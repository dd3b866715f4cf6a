use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use bookingcal_core::{ExportDocument, ExportSink};
use bookingcal_domain::{BookingCalError, Result as DomainResult};

/// In-memory `ExportSink` that records every document written.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<Vec<ExportDocument>>,
    failing: HashSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes of `file_name` fail with an I/O error.
    pub fn failing_for(mut self, file_name: &str) -> Self {
        self.failing.insert(file_name.to_string());
        self
    }

    pub fn documents(&self) -> Vec<ExportDocument> {
        self.documents.lock().unwrap().clone()
    }

    pub fn document(&self, file_name: &str) -> Option<ExportDocument> {
        self.documents().into_iter().find(|d| d.file_name == file_name)
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn write_document(&self, document: &ExportDocument) -> DomainResult<String> {
        if self.failing.contains(&document.file_name) {
            return Err(BookingCalError::Io(format!("disk full writing {}", document.file_name)));
        }
        self.documents.lock().unwrap().push(document.clone());
        Ok(format!("memory://{}", document.file_name))
    }
}
