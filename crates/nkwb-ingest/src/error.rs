//! Error types for NeuroWorkbench export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening an export.
///
/// Anomalies inside an otherwise readable sheet (unexpected headers, empty
/// paths, missing fields) are never errors; they are reported as skipped
/// rows in [`crate::ExportReport`].
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Export file not found.
    #[error("export file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory not found.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to list a directory.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Workbook Errors ===
    /// The compound document container cannot be parsed.
    #[error(
        "excel file {path} is corrupted: {source}. \
         Try opening it and saving it again with Excel to fix"
    )]
    Corrupted {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container is readable but does not hold a BIFF workbook stream.
    #[error("invalid workbook {path}: {reason}")]
    InvalidWorkbook { path: PathBuf, reason: String },

    /// The workbook has no worksheet.
    #[error("no worksheet found in {path}")]
    NoWorksheet { path: PathBuf },

    /// Cell values could not be decoded.
    #[error("failed to read cells of {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },
}

impl IngestError {
    /// True for the container failure that re-saving the file fixes.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
