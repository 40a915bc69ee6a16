//! Error types for input handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading inputs or writing artifacts.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File system ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file already exists and overwriting was not requested.
    #[error("output file [{path}] already exists")]
    OutputExists { path: PathBuf },

    // === CSV ===
    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has a header but no data rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Required column not found in a CSV file.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Configuration artifacts ===
    /// Failed to parse the JSON run configuration.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse an alias or taxonomy artifact.
    #[error("failed to parse {path}: {message}")]
    ArtifactParse { path: PathBuf, message: String },

    // === Alias skeleton ===
    /// Restrictions selected no rows from the causality file.
    #[error("nothing found for model {model:?} and category {c1name:?}")]
    NothingSelected {
        model: Option<String>,
        c1name: Option<String>,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

pub(crate) fn open_error(path: &std::path::Path, source: std::io::Error) -> IngestError {
    if source.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}
