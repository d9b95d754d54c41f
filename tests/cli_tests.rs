//! CLI-level tests: interchange document in, JSON envelope out.
//!
//! These call the run functions directly rather than spawning the binary;
//! the envelope shape is the contract under test.

use std::fs;

use serde_json::Value;
use tempfile::TempDir;

use closurefix::cli::{run_analyze, run_fix};
use closurefix::edit::Span;
use closurefix::interchange::{NodeRecord, TreeDocument};
use closurefix::tree::{LiteralKind, NodeKind};

// ============================================================================
// Fixture Construction
// ============================================================================

fn record(kind: NodeKind, start: usize, end: usize, children: &[u32]) -> NodeRecord {
    NodeRecord {
        kind,
        span: Span::new(start, end),
        children: children.to_vec(),
        literal_kind: None,
        qualified: false,
    }
}

fn literal_record(
    kind: NodeKind,
    start: usize,
    end: usize,
    literal_kind: LiteralKind,
) -> NodeRecord {
    NodeRecord {
        kind,
        span: Span::new(start, end),
        children: Vec::new(),
        literal_kind: Some(literal_kind),
        qualified: false,
    }
}

/// The interchange form of
/// `func main() {\n\tx := 1\n\tprocess(handler)\n}\n` with `handler`
/// marked as a zero-argument call head.
fn main_document() -> TreeDocument {
    let source = "func main() {\n\tx := 1\n\tprocess(handler)\n}\n";
    TreeDocument {
        source: source.to_string(),
        nodes: vec![
            record(NodeKind::SourceFile, 0, source.len(), &[1]),
            record(NodeKind::FunctionDecl, 0, 41, &[2]),
            record(NodeKind::BlockStmt, 12, 41, &[3, 6]),
            record(NodeKind::ShortVarDeclaration, 15, 21, &[4, 5]),
            literal_record(NodeKind::Identifier, 15, 16, LiteralKind::Int),
            literal_record(NodeKind::Literal, 20, 21, LiteralKind::Int),
            record(NodeKind::ExprStmt, 23, 39, &[7]),
            record(NodeKind::CallExpr, 23, 39, &[8, 10]),
            record(NodeKind::LiteralExpr, 23, 30, &[9]),
            literal_record(NodeKind::Identifier, 23, 30, LiteralKind::Identifier),
            record(NodeKind::CallExpr, 31, 38, &[11]),
            record(NodeKind::LiteralExpr, 31, 38, &[12]),
            literal_record(NodeKind::Identifier, 31, 38, LiteralKind::Identifier),
        ],
        resolved_types: Default::default(),
    }
}

fn write_document(dir: &TempDir, doc: &TreeDocument) -> std::path::PathBuf {
    let path = dir.path().join("tree.json");
    fs::write(&path, serde_json::to_string(doc).unwrap()).unwrap();
    path
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn analyze_reports_plan_and_action() {
    let dir = TempDir::new().unwrap();
    let tree_path = write_document(&dir, &main_document());

    // `handler` sits at line 3, column 10.
    let json = run_analyze(&tree_path, "3:10").unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "ok");
    assert_eq!(
        value["action"]["label"],
        "Create closure function \"handler\""
    );
    assert_eq!(value["action"]["family"], "Variable Declaration");
    assert_eq!(value["plan"]["target"], "handler");
    assert_eq!(value["plan"]["offset"], 21);
    assert_eq!(value["plan"]["line"], 2);
    assert_eq!(value["plan"]["text"], "\n\nhandler := func () {\n}\n");
}

#[test]
fn run_without_apply_leaves_filesystem_untouched() {
    let dir = TempDir::new().unwrap();
    let tree_path = write_document(&dir, &main_document());

    let json = run_fix(&tree_path, "3:10", false, None).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "ok");
    assert_eq!(value["edit"]["applied"], false);
    assert!(value["edit"].get("out").is_none());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn run_with_apply_writes_modified_source() {
    let dir = TempDir::new().unwrap();
    let tree_path = write_document(&dir, &main_document());
    let out_path = dir.path().join("main.go");

    let json = run_fix(&tree_path, "3:10", true, Some(&out_path)).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "ok");
    assert_eq!(value["edit"]["applied"], true);

    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        written,
        "func main() {\n\tx := 1\n\nhandler := func () {\n}\n\n\tprocess(handler)\n}\n"
    );
}

#[test]
fn analyze_refuses_non_call_head() {
    // x := y — `y` is a literal expression but its parent is the declaration.
    let source = "x := y";
    let doc = TreeDocument {
        source: source.to_string(),
        nodes: vec![
            record(NodeKind::SourceFile, 0, 6, &[1]),
            record(NodeKind::ShortVarDeclaration, 0, 6, &[2, 3]),
            literal_record(NodeKind::Identifier, 0, 1, LiteralKind::Identifier),
            record(NodeKind::LiteralExpr, 5, 6, &[4]),
            literal_record(NodeKind::Identifier, 5, 6, LiteralKind::Identifier),
        ],
        resolved_types: Default::default(),
    };

    let dir = TempDir::new().unwrap();
    let tree_path = write_document(&dir, &doc);

    let json = run_analyze(&tree_path, "1:6").unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["status"], "refused");
}

#[test]
fn analyze_reports_node_not_found() {
    let dir = TempDir::new().unwrap();
    let tree_path = write_document(&dir, &main_document());

    // Line 1 column 1 is the `func` keyword — no literal expression there.
    let err = run_analyze(&tree_path, "1:1").unwrap_err();
    assert_eq!(err.error_code().code(), 3);
}

#[test]
fn malformed_document_is_invalid_arguments() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");
    fs::write(&path, "{not json").unwrap();

    let err = run_analyze(&path, "1:1").unwrap_err();
    assert_eq!(err.error_code().code(), 2);
}
