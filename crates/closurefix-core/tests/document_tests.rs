//! Integration tests for the document model and text utilities together.

use closurefix_core::edit::{Document, DocumentEdit, Span};
use closurefix_core::text::{
    byte_offset_to_position, line_end_offset, line_span, span_to_line_range,
};

const SOURCE: &str = "func main() {\n\tx := 1\n\tprocess(handler)\n}\n";

#[test]
fn insertion_shifts_following_lines() {
    let mut doc = Document::new(SOURCE);
    let decl_end = SOURCE.find("x := 1").unwrap() + "x := 1".len();

    let edit = DocumentEdit::insert(decl_end, "\n\nhandler := func () {\n}\n")
        .with_expected_hash(doc.content_hash());
    doc.apply(&edit).unwrap();

    assert_eq!(
        doc.content(),
        "func main() {\n\tx := 1\n\nhandler := func () {\n}\n\n\tprocess(handler)\n}\n"
    );
    // The call moved from line 3 to line 7.
    let call_offset = doc.content().find("process").unwrap();
    assert_eq!(byte_offset_to_position(doc.content(), call_offset).0, 7);
}

#[test]
fn stale_edit_is_rejected_after_another_edit() {
    let mut doc = Document::new(SOURCE);
    let edit = DocumentEdit::insert(0, "// header\n").with_expected_hash(doc.content_hash());

    doc.insert(0, "package main\n\n").unwrap();
    assert!(doc.apply(&edit).is_err());
    assert!(doc.content().starts_with("package main\n"));
}

#[test]
fn line_math_agrees_with_spans() {
    let decl_start = SOURCE.find("x := 1").unwrap();
    let decl = Span::new(decl_start, decl_start + "x := 1".len());

    assert_eq!(span_to_line_range(SOURCE, &decl), (2, 2));
    assert_eq!(line_span(SOURCE, 2), Some(Span::new(14, 21)));
    assert_eq!(line_end_offset(SOURCE, 2), Some(21));
}

#[test]
fn replace_then_position_lookup() {
    let mut doc = Document::new("    x := 1\n");
    doc.replace(Span::new(0, 4), "\t").unwrap();
    assert_eq!(doc.content(), "\tx := 1\n");
    assert_eq!(byte_offset_to_position(doc.content(), 1), (1, 2));
}
