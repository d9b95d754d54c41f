//! CLI front door: load an interchange document, plan, optionally apply.
//!
//! The CLI is a batch context — there is no live caret, so apply performs
//! the text insertion and skips caret/reformat side effects. Interactive
//! hosts drive [`crate::editor`] through the library API instead.

use std::fs;
use std::path::Path;

use closurefix_core::error::FixError;
use closurefix_core::output::{
    render, ActionInfo, AnalyzeResponse, EditInfo, PlanInfo, RefusedResponse, RunResponse,
};
use closurefix_core::text::{byte_offset_to_position, position_to_byte_offset};

use crate::edit::Document;
use crate::editor::apply_plan;
use crate::fix::{plan, InsertionPlan};
use crate::interchange::{MapResolver, TreeDocument};
use crate::tree::{NodeId, SyntaxTree};

/// Plan a synthesis without touching any file.
///
/// Returns the JSON response body; refusal is a successful outcome with
/// `status: "refused"`.
pub fn run_analyze(tree_path: &Path, at: &str) -> Result<String, FixError> {
    let (tree, resolver) = load_tree(tree_path)?;
    let target = locate_target(&tree, tree_path, at)?;

    match plan(&tree, &resolver, target) {
        None => Ok(render(&RefusedResponse::new(REFUSAL_REASON))),
        Some(p) => {
            let response = AnalyzeResponse::new(action_info(&p), plan_info(&tree, &p));
            Ok(render(&response))
        }
    }
}

/// Plan and apply a synthesis to the document's source.
///
/// The modified source is written to `out` only when `apply` is set;
/// otherwise the edit is reported without touching the filesystem.
pub fn run_fix(
    tree_path: &Path,
    at: &str,
    apply: bool,
    out: Option<&Path>,
) -> Result<String, FixError> {
    if apply && out.is_none() {
        return Err(FixError::invalid_args("--apply requires --out"));
    }

    let (tree, resolver) = load_tree(tree_path)?;
    let target = locate_target(&tree, tree_path, at)?;

    let Some(p) = plan(&tree, &resolver, target) else {
        return Ok(render(&RefusedResponse::new(REFUSAL_REASON)));
    };

    let mut doc = Document::new(tree.source().to_string());
    let edit = apply_plan(&p, &mut doc, None)?;

    let mut out_path = None;
    if apply {
        // Checked above; apply implies an out path.
        if let Some(path) = out {
            fs::write(path, doc.content()).map_err(|err| FixError::Apply {
                message: format!("failed to write {}: {}", path.display(), err),
            })?;
            out_path = Some(path.display().to_string());
        }
    }

    let response = RunResponse::new(
        action_info(&p),
        plan_info(&tree, &p),
        EditInfo {
            offset: edit.offset,
            text: edit.text,
            applied: apply,
            out: out_path,
        },
    );
    Ok(render(&response))
}

const REFUSAL_REASON: &str = "not a synthesizable call head in a function body";

// ============================================================================
// Loading and Addressing
// ============================================================================

fn load_tree(tree_path: &Path) -> Result<(SyntaxTree, MapResolver), FixError> {
    let json = fs::read_to_string(tree_path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            FixError::file_not_found(tree_path.display().to_string())
        } else {
            FixError::internal(format!("failed to read {}: {}", tree_path.display(), err))
        }
    })?;
    let doc = TreeDocument::from_json(&json)
        .map_err(|err| FixError::invalid_args(format!("malformed tree document: {}", err)))?;
    Ok(doc.into_parts()?)
}

fn locate_target(tree: &SyntaxTree, tree_path: &Path, at: &str) -> Result<NodeId, FixError> {
    let (line, col) = parse_line_col(at).ok_or_else(|| {
        FixError::invalid_args(format!("invalid location '{}', expected line:col", at))
    })?;
    let offset = position_to_byte_offset(tree.source(), line, col);
    tree.literal_expression_at(offset)
        .ok_or_else(|| FixError::node_not_found(tree_path.display().to_string(), line, col))
}

fn parse_line_col(s: &str) -> Option<(u32, u32)> {
    let (line, col) = s.split_once(':')?;
    Some((line.trim().parse().ok()?, col.trim().parse().ok()?))
}

// ============================================================================
// Response Assembly
// ============================================================================

fn action_info(plan: &InsertionPlan) -> ActionInfo {
    let action = plan.action();
    ActionInfo {
        label: action.label(),
        family: action.family_name().to_string(),
    }
}

fn plan_info(tree: &SyntaxTree, plan: &InsertionPlan) -> PlanInfo {
    let (line, col) = byte_offset_to_position(tree.source(), plan.offset);
    PlanInfo {
        target: plan.target.clone(),
        params: plan.params.clone(),
        offset: plan.offset,
        line,
        col,
        inserted_lines: plan.inserted_lines,
        text: plan.text.clone(),
    }
}

// ============================================================================
// Tests
// ============================================================================
