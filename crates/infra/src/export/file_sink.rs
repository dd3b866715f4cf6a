use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bookingcal_core::{ExportDocument, ExportSink};
use bookingcal_domain::{BookingCalError, Result};
use tracing::info;

use crate::errors::InfraError;

/// Writes each monthly document to `<output_dir>/<file_name>`, replacing any
/// existing file of the same name.
#[derive(Debug, Clone)]
pub struct FileExportSink {
    output_dir: PathBuf,
}

impl FileExportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn target(&self, file_name: &str) -> Result<PathBuf> {
        let name = Path::new(file_name);
        if name.file_name().map(Path::new) != Some(name) {
            return Err(BookingCalError::Export(format!("refusing to write outside the output directory: {file_name}")));
        }
        Ok(self.output_dir.join(name))
    }
}

#[async_trait]
impl ExportSink for FileExportSink {
    async fn write_document(&self, document: &ExportDocument) -> Result<String> {
        let path = self.target(&document.file_name)?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| BookingCalError::from(InfraError::from(e)))?;
        tokio::fs::write(&path, document.contents.as_bytes())
            .await
            .map_err(|e| BookingCalError::from(InfraError::from(e)))?;

        info!(
            month = %document.month_key,
            path = %path.display(),
            bytes = document.contents.len(),
            "export.file_written"
        );
        Ok(path.display().to_string())
    }
}
