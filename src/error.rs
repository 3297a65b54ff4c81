//! Error types for `Cookoff`
//!
//! Top-level error hierarchy and the exit codes the CLI maps it to.

use std::path::PathBuf;
use thiserror::Error;

pub use cookoff_core::error::{Severity, ValidationError, ValidationIssue};

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `Cookoff` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Malformed snapshot data (future-dated items, out-of-order windows)
    pub const DATA_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `Cookoff` operations.
#[derive(Debug, Error)]
pub enum CookoffError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Snapshot data failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Snapshot file could not be read or parsed
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Invalid combination of arguments
    #[error("usage error: {0}")]
    Usage(String),

    /// Metrics recorder or exporter could not be installed
    #[error("metrics error: {0}")]
    Metrics(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CookoffError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Validation(_) => ExitCode::DATA_ERROR,
            Self::Snapshot(err) => err.exit_code(),
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Metrics(_) | Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}: {}", first_issue(errors))]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

fn first_issue(errors: &[ValidationIssue]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

// ============================================================================
// Snapshot Errors
// ============================================================================

/// Errors reading backend snapshot files.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot file does not exist or cannot be read
    #[error("cannot read snapshot {path}: {source}")]
    Unreadable {
        /// Path to the snapshot
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File extension is neither JSON nor YAML
    #[error("unsupported snapshot format for {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat {
        /// Path to the snapshot
        path: PathBuf,
    },

    /// Rows could not be deserialized
    #[error("malformed snapshot {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    Malformed {
        /// Path to the snapshot
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Parser message
        message: String,
    },

    /// Snapshot exceeds a configured limit
    #[error("snapshot {path} too large: {actual} (limit: {limit})")]
    TooLarge {
        /// Path to the snapshot
        path: PathBuf,
        /// What was measured, with its unit
        actual: String,
        /// Configured limit, with its unit
        limit: String,
    },

    /// A requested competition id is absent from the snapshot
    #[error("competition '{id}' not found in {path}")]
    UnknownCompetition {
        /// Requested id
        id: String,
        /// Path to the snapshot
        path: PathBuf,
    },
}

impl SnapshotError {
    /// Exit code for this snapshot failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Unreadable { .. } => ExitCode::IO_ERROR,
            Self::UnsupportedFormat { .. } => ExitCode::USAGE_ERROR,
            Self::Malformed { .. } | Self::TooLarge { .. } | Self::UnknownCompetition { .. } => {
                ExitCode::DATA_ERROR
            }
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `Cookoff` operations.
pub type Result<T> = std::result::Result<T, CookoffError>;

// ============================================================================
// Tests
// ============================================================================
