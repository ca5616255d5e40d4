//! Error types for loading SPM images

use std::path::PathBuf;
use thiserror::Error;

use crate::types::FileType;

/// Opaque failure reported by a format backend. Backends decide what goes in here; the loader
/// never inspects it, only wraps it in [`LoadError::Backend`].
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while loading an image
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input path does not exist
    #[error("File does not exist: {path:?}")]
    NotFound { path: PathBuf },

    /// The file extension is neither a Matrix nor a Nanonis marker
    #[error("Filetype is not recognized: {path:?}")]
    UnrecognizedFormat { path: PathBuf },

    /// A Matrix file was given to a loader built without a Matrix backend
    #[error("No Matrix backend configured to read {path:?}")]
    MatrixBackendUnavailable { path: PathBuf },

    /// The format backend failed to open or decode the file
    #[error("{format} backend failed: {source}")]
    Backend {
        format: FileType,
        #[source]
        source: BackendError,
    },

    /// The configured trace index is not available in the file
    #[error("Trace {requested} requested but the file only holds {available} trace(s)")]
    TraceOutOfRange { requested: usize, available: usize },

    /// The configured channel is not recorded in the file
    #[error("Channel '{channel}' not found, available: {available}")]
    MissingChannel { channel: String, available: String },

    /// The channel exists but not in the requested direction
    #[error("Channel '{channel}' has no {direction} signal")]
    MissingSignal {
        channel: String,
        direction: &'static str,
    },

    /// Required header field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Header field is present but has the wrong shape
    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    /// A "<number> <unit>" value could not be parsed
    #[error("Cannot parse '{value}' in field '{field}' as <number> <unit>")]
    UnitParse { field: String, value: String },
}

impl LoadError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            expected,
        }
    }

    /// Wrap a backend failure, tagging it with the format that produced it.
    pub fn backend(format: FileType, source: impl Into<BackendError>) -> Self {
        Self::Backend {
            format,
            source: source.into(),
        }
    }
}

/// Result type for load operations
pub type Result<T> = std::result::Result<T, LoadError>;
