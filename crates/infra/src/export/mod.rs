//! Filesystem export of calendar documents

pub mod file_sink;

pub use file_sink::FileExportSink;
