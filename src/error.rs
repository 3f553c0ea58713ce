//! Error types for `ncma-linker`
//!
//! Every failure is fatal: the command aborts and nothing is written.
//! This module maps each failure kind to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `ncma-linker` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Input data error (malformed document or record, bad calculator input)
    pub const DATA_ERROR: i32 = 2;

    /// I/O error (input not found, output not writable)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `ncma-linker` operations.
#[derive(Debug, Error)]
pub enum LinkerError {
    /// Table rewrite failure
    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    /// Iron-buffer calculator failure
    #[error(transparent)]
    Calculator(#[from] CalculatorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LinkerError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Rewrite(err) => err.exit_code(),
            Self::Calculator(_) => ExitCode::DATA_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Rewrite Errors
// ============================================================================

/// Failures of the table rewrite pipeline.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The source file does not exist or is not readable
    #[error("cannot read {path}: {source}")]
    InputNotFound {
        /// Path to the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The source is not JSON, or lacks a usable `aaData` array
    #[error("malformed input{}: {message}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    MalformedInput {
        /// Path to the input file, when the document came from disk
        path: Option<PathBuf>,
        /// What was wrong with the document
        message: String,
    },

    /// A record cannot be rewritten
    #[error("malformed record at aaData[{index}]: {reason}")]
    MalformedRecord {
        /// Position of the offending record in `aaData`
        index: usize,
        /// What was wrong with the record
        reason: String,
    },

    /// The destination could not be written
    #[error("cannot write {path}: {source}")]
    OutputWrite {
        /// Path to the output file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized
    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RewriteError {
    /// Attaches the source file to a [`RewriteError::MalformedInput`].
    #[must_use]
    pub fn with_input_path(self, input: &std::path::Path) -> Self {
        match self {
            Self::MalformedInput { message, .. } => Self::MalformedInput {
                path: Some(input.to_path_buf()),
                message,
            },
            other => other,
        }
    }

    /// Returns the exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound { .. } | Self::OutputWrite { .. } => ExitCode::IO_ERROR,
            Self::MalformedInput { .. } | Self::MalformedRecord { .. } => ExitCode::DATA_ERROR,
            Self::Encode(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Calculator Errors
// ============================================================================

/// Iron-buffer calculator errors.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// A parameter is out of its physical range
    #[error("invalid value for '{name}': got {value}, expected {expected}")]
    InvalidParameter {
        /// Name of the parameter
        name: &'static str,
        /// The value provided
        value: f64,
        /// Description of the accepted range
        expected: &'static str,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `ncma-linker` operations.
pub type Result<T> = std::result::Result<T, LinkerError>;

// ============================================================================
// Tests
// ============================================================================
