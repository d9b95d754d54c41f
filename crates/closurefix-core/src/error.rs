//! Error types and error code constants for closurefix.
//!
//! This module provides a unified error type (`FixError`) bridging
//! subsystem errors into a common format suitable for JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller, malformed tree document)
//! - `3`: Resolution errors (no identifier at location, file not found)
//! - `4`: Apply errors (failed to apply the insertion)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! Refusal of a synthesis request (legality gate fails, no enclosing
//! function) is NOT an error and never appears here — the planner returns
//! `None` and the CLI reports `status: "refused"` with exit code 0.

use std::fmt;

use thiserror::Error;

use crate::edit::ApplyError;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, malformed request).
    InvalidArguments = 2,
    /// Resolution errors (no identifier at location, file not found).
    ResolutionError = 3,
    /// Apply errors (failed to apply the insertion).
    ApplyError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
///
/// This is the canonical error type that all subsystem errors are converted
/// to before being rendered as JSON output.
#[derive(Debug, Error)]
pub enum FixError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// No identifier expression at the specified location.
    #[error("no identifier found at {file}:{line}:{col}")]
    NodeNotFound { file: String, line: u32, col: u32 },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// The syntax tree interchange document violates a tree invariant.
    #[error("malformed syntax tree: {reason}")]
    MalformedTree { reason: String },

    /// Failed to apply the insertion.
    #[error("apply error: {message}")]
    Apply { message: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&FixError> for OutputErrorCode {
    fn from(err: &FixError) -> Self {
        match err {
            FixError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            FixError::NodeNotFound { .. } => OutputErrorCode::ResolutionError,
            FixError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
            FixError::MalformedTree { .. } => OutputErrorCode::InvalidArguments,
            FixError::Apply { .. } => OutputErrorCode::ApplyError,
            FixError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<FixError> for OutputErrorCode {
    fn from(err: FixError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Bridge: ApplyError -> FixError
// ============================================================================

impl From<ApplyError> for FixError {
    fn from(err: ApplyError) -> Self {
        FixError::Apply {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl FixError {
    /// Create an invalid arguments error with optional details.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        FixError::InvalidArguments {
            message: message.into(),
            details: None,
        }
    }

    /// Create a node not found error.
    pub fn node_not_found(file: impl Into<String>, line: u32, col: u32) -> Self {
        FixError::NodeNotFound {
            file: file.into(),
            line,
            col,
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        FixError::FileNotFound { path: path.into() }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        FixError::Internal {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }

    /// Stable kind string for the JSON error body.
    pub fn kind(&self) -> &'static str {
        match self {
            FixError::InvalidArguments { .. } => "InvalidArguments",
            FixError::NodeNotFound { .. } => "NodeNotFound",
            FixError::FileNotFound { .. } => "FileNotFound",
            FixError::MalformedTree { .. } => "MalformedTree",
            FixError::Apply { .. } => "ApplyError",
            FixError::Internal { .. } => "InternalError",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
