//! Error types for sheet import and export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing sheets and workbooks.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Header row is missing or has a blank column name.
    #[error("invalid header row in {path}: {reason}")]
    InvalidHeader { path: PathBuf, reason: String },

    // === Workbook JSON Errors ===
    #[error("invalid workbook JSON {path}: {source}")]
    WorkbookJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Workbook document whose top level is not an object.
    #[error("invalid workbook {path}: {reason}")]
    InvalidWorkbook { path: PathBuf, reason: String },
}

/// Result type for import and export operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::DirectoryNotFound {
            path: PathBuf::from("/data/roster"),
        };
        assert_eq!(err.to_string(), "directory not found: /data/roster");
    }
}
