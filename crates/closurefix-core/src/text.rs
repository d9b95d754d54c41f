//! Text position utilities for byte offset and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count bytes, not characters
//! - Line/column values of 0 are treated as 1 (defensive clamping)
//!
//! A line is a maximal run of bytes not containing `\n`; a trailing newline
//! does not open a new line (`"x\n"` has one line).

use crate::edit::Span;

// ============================================================================
// Offset <-> Position
// ============================================================================

/// Convert a byte offset to 1-indexed line and column.
///
/// If `offset` exceeds content length, returns the position at end of content.
pub fn byte_offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(content.len());
    let mut line = 1u32;
    let mut col = 1u32;

    for (i, &byte) in content.as_bytes().iter().enumerate() {
        if i >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Convert 1-indexed line and column to byte offset.
///
/// Positions beyond the end of a line clamp to the line end; positions beyond
/// the last line clamp to the content length.
pub fn position_to_byte_offset(content: &str, line: u32, col: u32) -> usize {
    let line = line.max(1);
    let col = col.max(1);

    match line_span(content, line) {
        Some(span) => {
            let offset_in_line = (col as usize).saturating_sub(1);
            span.start + offset_in_line.min(span.len())
        }
        None => content.len(),
    }
}

// ============================================================================
// Line Utilities
// ============================================================================

/// Get the span of a 1-indexed line, excluding its terminating newline.
///
/// Returns `None` if the line doesn't exist. Lines between consecutive
/// newlines are empty but real; the region after a trailing newline is not a
/// line.
pub fn line_span(content: &str, line: u32) -> Option<Span> {
    if line == 0 {
        return None;
    }
    let mut current = 1u32;
    let mut start = 0usize;

    for (i, &byte) in content.as_bytes().iter().enumerate() {
        if byte == b'\n' {
            if current == line {
                return Some(Span::new(start, i));
            }
            current += 1;
            start = i + 1;
        }
    }

    if current == line && !content.ends_with('\n') {
        return Some(Span::new(start, content.len()));
    }
    None
}

/// Get the byte offset of the end of a 1-indexed line (its newline, or the
/// content length for the last line).
pub fn line_end_offset(content: &str, line: u32) -> Option<usize> {
    line_span(content, line).map(|span| span.end)
}

/// Count the number of lines in the content.
pub fn line_count(content: &str) -> u32 {
    let newlines = content.as_bytes().iter().filter(|&&b| b == b'\n').count() as u32;
    if content.is_empty() {
        0
    } else if content.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

// ============================================================================
// Span Utilities
// ============================================================================

/// Get the line range spanned by a byte span.
///
/// Returns `(start_line, end_line)` both 1-indexed.
pub fn span_to_line_range(content: &str, span: &Span) -> (u32, u32) {
    let (start_line, _) = byte_offset_to_position(content, span.start);
    let (end_line, _) =
        byte_offset_to_position(content, span.end.saturating_sub(1).max(span.start));
    (start_line, end_line)
}

/// Extract the text content of a span.
///
/// Returns `None` if the span extends beyond content bounds or splits a
/// character.
pub fn extract_span_str<'a>(content: &'a str, span: &Span) -> Option<&'a str> {
    content.get(span.start..span.end)
}

// ============================================================================
// Tests
// ============================================================================
