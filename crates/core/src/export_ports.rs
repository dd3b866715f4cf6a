//! Export storage port

use async_trait::async_trait;
use bookingcal_domain::Result;

/// A serialized calendar document for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub month_key: String,
    pub file_name: String,
    pub contents: String,
}

/// Trait for persisting export documents
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Store the document, returning where it was written.
    async fn write_document(&self, document: &ExportDocument) -> Result<String>;
}
