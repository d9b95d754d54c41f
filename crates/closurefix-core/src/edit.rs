//! Document model and atomic insertion edits.
//!
//! A [`Document`] owns the live text buffer; a [`DocumentEdit`] is a single
//! text insertion with optional content-hash verification. Edits either apply
//! completely or leave the document untouched — there is no partial
//! application.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Hash type for content verification (SHA-256, stored as hex string for JSON compatibility).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Compute SHA-256 hash of the given bytes, returning hex-encoded string.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentHash(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Span
// ============================================================================

/// Byte offsets into document content.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains a byte offset.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check if this span contains another span entirely.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ============================================================================
// Apply Errors
// ============================================================================

/// A detected condition that prevents an edit from applying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// Offset is past the end of the document.
    #[error("insertion offset {offset} out of bounds (document length {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// Offset falls inside a multi-byte character.
    #[error("offset {offset} is not a character boundary")]
    NotCharBoundary { offset: usize },

    /// Span extends past the end of the document.
    #[error("span {span} out of bounds (document length {len})")]
    SpanOutOfBounds { span: Span, len: usize },

    /// Document content changed since the edit was computed.
    #[error("document changed since the edit was computed (expected {expected}, got {actual})")]
    HashMismatch {
        expected: ContentHash,
        actual: ContentHash,
    },
}

// ============================================================================
// DocumentEdit
// ============================================================================

/// A single atomic text insertion.
///
/// When `expected_hash` is set, the edit only applies if the document content
/// hashes to that value — the same snapshot the edit was planned against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEdit {
    /// Byte offset to insert at.
    pub offset: usize,
    /// The text to insert.
    pub text: String,
    /// Hash of the document content this edit was computed against.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expected_hash: Option<ContentHash>,
}

impl DocumentEdit {
    /// Create an insertion edit without hash verification.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        DocumentEdit {
            offset,
            text: text.into(),
            expected_hash: None,
        }
    }

    /// Require the document to hash to `hash` before this edit applies.
    pub fn with_expected_hash(mut self, hash: ContentHash) -> Self {
        self.expected_hash = Some(hash);
        self
    }
}

// ============================================================================
// Document
// ============================================================================

/// An owned text buffer, the sole mutable resource of a synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    content: String,
}

impl Document {
    /// Create a document from its initial content.
    pub fn new(content: impl Into<String>) -> Self {
        Document {
            content: content.into(),
        }
    }

    /// The current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume the document, returning its content.
    pub fn into_content(self) -> String {
        self.content
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Hash of the current content.
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::compute(self.content.as_bytes())
    }

    /// Apply a single edit atomically.
    ///
    /// Verifies the expected hash (when present) and bounds before any
    /// mutation; on error the document is unchanged.
    pub fn apply(&mut self, edit: &DocumentEdit) -> Result<(), ApplyError> {
        if let Some(expected) = &edit.expected_hash {
            let actual = self.content_hash();
            if &actual != expected {
                tracing::warn!(
                    expected = %expected,
                    actual = %actual,
                    "refusing edit: document changed since plan"
                );
                return Err(ApplyError::HashMismatch {
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        self.insert(edit.offset, &edit.text)
    }

    /// Insert text at a byte offset.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), ApplyError> {
        if offset > self.content.len() {
            return Err(ApplyError::OffsetOutOfBounds {
                offset,
                len: self.content.len(),
            });
        }
        if !self.content.is_char_boundary(offset) {
            return Err(ApplyError::NotCharBoundary { offset });
        }
        self.content.insert_str(offset, text);
        Ok(())
    }

    /// Replace the bytes in `span` with new text.
    pub fn replace(&mut self, span: Span, text: &str) -> Result<(), ApplyError> {
        if span.end > self.content.len() {
            return Err(ApplyError::SpanOutOfBounds {
                span,
                len: self.content.len(),
            });
        }
        if !self.content.is_char_boundary(span.start) || !self.content.is_char_boundary(span.end) {
            return Err(ApplyError::NotCharBoundary { offset: span.start });
        }
        self.content.replace_range(span.start..span.end, text);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
