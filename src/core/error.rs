//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`NavigatorError`] which covers every failure mode of the
//! workspace engine and the CLI around it. It uses `thiserror` for ergonomic error
//! definitions and includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`NavigatorError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, NavigatorError>`
//!
//! # Error Categories
//! - **Repository state**: No open checkout, unsupported repository schema
//! - **External queries**: `fossil` process failures and non-zero exits
//! - **Filesystem**: Reported files missing from disk, I/O errors
//! - **Selection parsing**: Invalid row indices and ranges
//! - **Configuration**: Config directory, read/parse/write failures

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for fossil-navigator
#[derive(Error, Debug)]
pub enum NavigatorError {
    // Repository state
    #[error("Not in a fossil workspace")]
    RepositoryUnavailable,

    #[error("The repository schema is too old for this version of fossil. Run 'fossil rebuild'")]
    SchemaUnsupported,

    // External queries
    #[error("fossil {command} failed: {message}")]
    ExternalQueryFailed { command: String, message: String },

    #[error("Operation cancelled")]
    Cancelled,

    // Filesystem
    #[error("File reported by fossil is missing from disk: {path}")]
    FilesystemInconsistency { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid ignore glob '{pattern}': {source}")]
    InvalidIgnoreGlob {
        pattern: String,
        source: glob::PatternError,
    },

    // Selection parsing
    #[error("Invalid range format: '{range}'. Use format like '3-6'")]
    InvalidRangeFormat { range: String },

    #[error("Invalid number in range: '{number}'")]
    InvalidRangeNumber { number: String },

    #[error("Invalid range: start ({start}) must be <= end ({end})")]
    InvalidRangeOrder { start: usize, end: usize },

    #[error("Invalid number: '{number}'")]
    InvalidNumber { number: String },

    #[error("Index must be positive (got 0)")]
    ZeroIndex,

    #[error("Index {index} is out of range (1-{max} available)")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("No files available to select from")]
    NoFilesAvailable,

    #[error("Unknown status name '{name}'. Use edited, unchanged, added, deleted, renamed, missing, conflicted, unknown, ignored, modified, repo or all")]
    UnknownStatusName { name: String },

    // Configuration
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using NavigatorError
pub type Result<T> = std::result::Result<T, NavigatorError>;

impl NavigatorError {
    /// Create an external query failure for a fossil subcommand
    pub fn external_query_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalQueryFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a filesystem inconsistency error for a reported path
    pub fn filesystem_inconsistency(path: impl Into<String>) -> Self {
        Self::FilesystemInconsistency { path: path.into() }
    }

    /// Create an invalid ignore glob error
    pub fn invalid_ignore_glob(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::InvalidIgnoreGlob {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, max: usize) -> Self {
        Self::IndexOutOfRange { index, max }
    }

    /// Create an invalid range format error
    pub fn invalid_range_format(range: impl Into<String>) -> Self {
        Self::InvalidRangeFormat {
            range: range.into(),
        }
    }

    /// Create an invalid range number error
    pub fn invalid_range_number(number: impl Into<String>) -> Self {
        Self::InvalidRangeNumber {
            number: number.into(),
        }
    }

    /// Create an invalid range order error
    pub fn invalid_range_order(start: usize, end: usize) -> Self {
        Self::InvalidRangeOrder { start, end }
    }

    /// Create an invalid number error
    pub fn invalid_number(number: impl Into<String>) -> Self {
        Self::InvalidNumber {
            number: number.into(),
        }
    }

    /// Create an unknown status name error
    pub fn unknown_status_name(name: impl Into<String>) -> Self {
        Self::UnknownStatusName { name: name.into() }
    }

    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }
}
