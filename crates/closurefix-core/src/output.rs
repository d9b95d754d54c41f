//! JSON output types and serialization for CLI responses.
//!
//! These types form the contract between the CLI and its consumers:
//!
//! 1. **Status first:** every response has `status` as its first field
//!    (`ok`, `refused`, or `error`)
//! 2. **Deterministic:** same input -> same output (field order is struct
//!    declaration order)
//! 3. **Refusal is not an error:** a refused synthesis reports
//!    `status: "refused"` and exits 0

use serde::{Deserialize, Serialize};

use crate::error::FixError;

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Payload Types
// ============================================================================

/// Presentation metadata for the synthesized action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionInfo {
    /// Display label, e.g. `Create closure function "handler"`.
    pub label: String,
    /// Category label for quick-fix listings.
    pub family: String,
}

/// A computed insertion plan, for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInfo {
    /// The identifier the closure will be bound to.
    pub target: String,
    /// Synthesized formal parameter list text.
    pub params: String,
    /// Byte offset of the insertion.
    pub offset: usize,
    /// Line of the insertion point (1-indexed).
    pub line: u32,
    /// Column of the insertion point (1-indexed).
    pub col: u32,
    /// Number of lines covered by the re-indent pass.
    pub inserted_lines: u32,
    /// The exact text to insert.
    pub text: String,
}

/// The applied (or previewed) document edit, for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditInfo {
    /// Byte offset of the insertion.
    pub offset: usize,
    /// Inserted text.
    pub text: String,
    /// Whether the modified source was written out.
    pub applied: bool,
    /// Path the modified source was written to.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub out: Option<String>,
}

// ============================================================================
// Response Envelopes
// ============================================================================

/// Successful `analyze` response: a plan, nothing mutated.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub schema_version: &'static str,
    pub action: ActionInfo,
    pub plan: PlanInfo,
}

impl AnalyzeResponse {
    pub fn new(action: ActionInfo, plan: PlanInfo) -> Self {
        AnalyzeResponse {
            status: "ok",
            schema_version: SCHEMA_VERSION,
            action,
            plan,
        }
    }
}

/// Successful `run` response: a plan and the resulting edit.
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub status: &'static str,
    pub schema_version: &'static str,
    pub action: ActionInfo,
    pub plan: PlanInfo,
    pub edit: EditInfo,
}

impl RunResponse {
    pub fn new(action: ActionInfo, plan: PlanInfo, edit: EditInfo) -> Self {
        RunResponse {
            status: "ok",
            schema_version: SCHEMA_VERSION,
            action,
            plan,
            edit,
        }
    }
}

/// The request was legal input but not a synthesizable site.
#[derive(Debug, Clone, Serialize)]
pub struct RefusedResponse {
    pub status: &'static str,
    pub schema_version: &'static str,
    pub reason: String,
}

impl RefusedResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        RefusedResponse {
            status: "refused",
            schema_version: SCHEMA_VERSION,
            reason: reason.into(),
        }
    }
}

/// Error body inside an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: u8,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error envelope, written to stderr with a mapped exit code.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub schema_version: &'static str,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn from_error(err: &FixError) -> Self {
        let details = match err {
            FixError::InvalidArguments { details, .. } => details.clone(),
            _ => None,
        };
        ErrorResponse {
            status: "error",
            schema_version: SCHEMA_VERSION,
            error: ErrorBody {
                code: err.error_code().code(),
                kind: err.kind(),
                message: err.to_string(),
                details,
            },
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a response to its single-line JSON form.
pub fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| {
        // The response types above cannot fail to serialize; this branch
        // exists so callers never have to handle a render error.
        "{\"status\":\"error\",\"error\":{\"code\":10,\"kind\":\"InternalError\",\
         \"message\":\"response serialization failed\"}}"
            .to_string()
    })
}

// ============================================================================
// Tests
// ============================================================================
