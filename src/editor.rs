//! The editor boundary: plan application, caret movement, re-indentation.
//!
//! Everything here mutates the live document; the planning side never does.
//! When no editor state is supplied (batch inspection passes), only the text
//! insertion happens and caret/reformat side effects are skipped.

use closurefix_core::edit::{ApplyError, Document, DocumentEdit, Span};
use closurefix_core::text::{byte_offset_to_position, line_end_offset, line_span};

use crate::fix::InsertionPlan;

/// Interactive caret state owned by the host editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Caret byte offset into the document.
    pub caret: usize,
}

impl EditorState {
    pub fn new() -> Self {
        EditorState::default()
    }
}

/// Apply an insertion plan as one atomic edit.
///
/// With an editor present: re-indents the affected line range
/// `[first, first + inserted_lines)`, moves the caret to the end of the new
/// closure's declaration line, then simulates one press of Enter so the
/// caret lands inside the empty body ready to type.
///
/// A failed hash or bounds check leaves the document untouched.
pub fn apply_plan(
    plan: &InsertionPlan,
    doc: &mut Document,
    editor: Option<&mut EditorState>,
) -> Result<DocumentEdit, ApplyError> {
    let edit = DocumentEdit::insert(plan.offset, plan.text.clone())
        .with_expected_hash(plan.base_hash.clone());
    doc.apply(&edit)?;

    if let Some(editor) = editor {
        let (first, _) = byte_offset_to_position(doc.content(), plan.offset);
        reformat_lines(doc, first, first + plan.inserted_lines)?;
        if let Some(end) = line_end_offset(doc.content(), first + 2) {
            editor.caret = end;
        }
        press_enter(doc, editor)?;
    }

    Ok(edit)
}

/// Re-indent the 1-indexed line range `[first, last)` by brace depth.
///
/// Best-effort: depth counts raw `{`/`}` bytes, so braces inside string or
/// character literals skew it. Blank lines are left blank; indentation is
/// tabs, one per depth level. Lines are rewritten last-to-first so earlier
/// rewrites don't shift later line offsets.
pub fn reformat_lines(doc: &mut Document, first: u32, last: u32) -> Result<(), ApplyError> {
    for line in (first..last).rev() {
        let Some(span) = line_span(doc.content(), line) else {
            continue;
        };
        let text = &doc.content()[span.start..span.end];
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            if !text.is_empty() {
                // Strip stray whitespace from blank lines.
                doc.replace(span, "")?;
            }
            continue;
        }

        let depth = indent_depth(doc.content(), span.start, trimmed);
        let ws_end = span.start + (text.len() - trimmed.len());
        let indent = "\t".repeat(depth);
        if &doc.content()[span.start..ws_end] != indent {
            doc.replace(Span::new(span.start, ws_end), &indent)?;
        }
    }
    Ok(())
}

fn indent_depth(content: &str, line_start: usize, trimmed_line: &str) -> usize {
    let mut depth: i32 = 0;
    for &byte in content[..line_start].as_bytes() {
        match byte {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
    }
    if trimmed_line.starts_with('}') {
        depth -= 1;
    }
    depth.max(0) as usize
}

/// Simulate one press of Enter at the caret: break the line and indent the
/// new one like the current line, one level deeper when the caret sits after
/// an opening brace.
pub fn press_enter(doc: &mut Document, editor: &mut EditorState) -> Result<(), ApplyError> {
    let content = doc.content();
    let caret = editor.caret.min(content.len());
    let (line, _) = byte_offset_to_position(content, caret);

    let before_caret = match line_span(content, line) {
        Some(span) => &content[span.start..caret.max(span.start)],
        None => "",
    };
    let ws_len = before_caret.len() - before_caret.trim_start().len();
    let mut inserted = String::from("\n");
    inserted.push_str(&before_caret[..ws_len]);
    if before_caret.trim_end().ends_with('{') {
        inserted.push('\t');
    }

    doc.insert(caret, &inserted)?;
    editor.caret = caret + inserted.len();
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use closurefix_core::edit::ContentHash;

    fn plan_for(source: &str, offset: usize, text: &str) -> InsertionPlan {
        InsertionPlan {
            target: "handler".to_string(),
            params: String::new(),
            offset,
            text: text.to_string(),
            inserted_lines: 3,
            base_hash: ContentHash::compute(source.as_bytes()),
        }
    }

    const SOURCE: &str = "func main() {\n\tx := 1\n\tprocess(handler)\n}\n";

    #[test]
    fn apply_without_editor_inserts_only() {
        let mut doc = Document::new(SOURCE);
        let plan = plan_for(SOURCE, 21, "\n\nhandler := func () {\n}\n");
        apply_plan(&plan, &mut doc, None).unwrap();
        assert_eq!(
            doc.content(),
            "func main() {\n\tx := 1\n\nhandler := func () {\n}\n\n\tprocess(handler)\n}\n"
        );
    }

    #[test]
    fn apply_with_editor_reindents_and_places_caret() {
        let mut doc = Document::new(SOURCE);
        let mut editor = EditorState::new();
        let plan = plan_for(SOURCE, 21, "\n\nhandler := func () {\n}\n");
        apply_plan(&plan, &mut doc, Some(&mut editor)).unwrap();

        assert_eq!(
            doc.content(),
            "func main() {\n\tx := 1\n\n\thandler := func () {\n\t\t\n}\n\n\tprocess(handler)\n}\n"
        );
        // Caret sits at the end of the blank body line, ready to type.
        let body_line_end = doc.content().find("\t\t\n").unwrap() + 2;
        assert_eq!(editor.caret, body_line_end);
    }

    #[test]
    fn apply_refuses_stale_document() {
        let mut doc = Document::new("something else entirely\n");
        let plan = plan_for(SOURCE, 21, "\n\nhandler := func () {\n}\n");
        let err = apply_plan(&plan, &mut doc, None).unwrap_err();
        assert!(matches!(err, ApplyError::HashMismatch { .. }));
        assert_eq!(doc.content(), "something else entirely\n");
    }

    #[test]
    fn reformat_sets_tab_depth() {
        let mut doc = Document::new("func f() {\nx := 1\n    y := 2\n}\n");
        reformat_lines(&mut doc, 2, 4).unwrap();
        assert_eq!(doc.content(), "func f() {\n\tx := 1\n\ty := 2\n}\n");
    }

    #[test]
    fn reformat_dedents_closing_brace() {
        let mut doc = Document::new("func f() {\n\t}\n");
        reformat_lines(&mut doc, 2, 3).unwrap();
        assert_eq!(doc.content(), "func f() {\n}\n");
    }

    #[test]
    fn reformat_leaves_blank_lines_blank() {
        let mut doc = Document::new("func f() {\n\t \nx := 1\n}\n");
        reformat_lines(&mut doc, 2, 4).unwrap();
        assert_eq!(doc.content(), "func f() {\n\n\tx := 1\n}\n");
    }

    #[test]
    fn press_enter_indents_into_block() {
        let mut doc = Document::new("\thandler := func () {\n}\n");
        let mut editor = EditorState { caret: 21 };
        press_enter(&mut doc, &mut editor).unwrap();
        assert_eq!(doc.content(), "\thandler := func () {\n\t\t\n}\n");
        assert_eq!(editor.caret, 24);
    }

    #[test]
    fn press_enter_keeps_indent_outside_block() {
        let mut doc = Document::new("\tx := 1\n");
        let mut editor = EditorState { caret: 7 };
        press_enter(&mut doc, &mut editor).unwrap();
        assert_eq!(doc.content(), "\tx := 1\n\t\n");
        assert_eq!(editor.caret, 9);
    }
}
