//! Insertion planning for closure-function synthesis.
//!
//! `plan` is pure: it reads the tree and produces an [`InsertionPlan`] (or
//! refuses) without touching any document. Application lives in
//! [`crate::editor`].

use closurefix_core::edit::ContentHash;

use crate::args::synthesize_params;
use crate::classify::is_synthesizable_call_head;
use crate::tree::{NodeId, NodeKind, SyntaxTree};
use crate::typesig::TypeResolver;

/// Lines covered by the re-indent pass after insertion.
const INSERTED_LINE_COUNT: u32 = 3;

// ============================================================================
// Action Metadata
// ============================================================================

/// Presentation metadata for the quick-fix listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixAction {
    target: String,
}

impl FixAction {
    pub fn new(target: impl Into<String>) -> Self {
        FixAction {
            target: target.into(),
        }
    }

    /// Display label shown in the quick-fix listing.
    pub fn label(&self) -> String {
        format!("Create closure function \"{}\"", self.target)
    }

    /// Category label for the listing.
    pub fn family_name(&self) -> &'static str {
        "Variable Declaration"
    }
}

// ============================================================================
// Insertion Plan
// ============================================================================

/// A computed insertion, consumed exactly once by the applier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlan {
    /// The identifier the closure will be bound to.
    pub target: String,
    /// Synthesized formal parameter list text.
    pub params: String,
    /// Byte offset of the insertion.
    pub offset: usize,
    /// The exact text to insert.
    pub text: String,
    /// Number of lines the applier re-indents.
    pub inserted_lines: u32,
    /// Hash of the source this plan was computed against.
    pub base_hash: ContentHash,
}

impl InsertionPlan {
    /// The quick-fix metadata for this plan's target.
    pub fn action(&self) -> FixAction {
        FixAction::new(&self.target)
    }
}

/// Compute the insertion plan for a closure bound to `node`'s identifier.
///
/// Returns `None` (refused, not an error) when the legality gate fails or no
/// enclosing function body exists. Refusal has no side effects, so repeated
/// calls on the same node refuse identically.
///
/// The insertion point is the end of the first declaration inside the
/// enclosing function's body — a grouped `var (...)` block, else a single
/// `var` declaration, else a short-form declaration — or, when the body has
/// no declaration at all, the block's start offset plus two, skipping the
/// opening brace and the following newline. The fallback assumes that exact
/// formatting; it is a known approximation.
pub fn plan(
    tree: &SyntaxTree,
    resolver: &dyn TypeResolver,
    node: NodeId,
) -> Option<InsertionPlan> {
    if !is_synthesizable_call_head(tree, node) {
        tracing::debug!(%node, "refused: not a synthesizable call head");
        return None;
    }

    let Some(func) = tree.ancestor_of_kind(node, NodeKind::FunctionDecl) else {
        tracing::debug!(%node, "refused: no enclosing function declaration");
        return None;
    };
    let Some(block) = tree.first_descendant_of_kind(func, NodeKind::BlockStmt) else {
        tracing::debug!(%node, "refused: enclosing function has no body block");
        return None;
    };

    let declaration = tree
        .first_descendant_of_kind(block, NodeKind::VarDeclarations)
        .or_else(|| tree.first_descendant_of_kind(block, NodeKind::VarDeclaration))
        .or_else(|| tree.first_descendant_of_kind(block, NodeKind::ShortVarDeclaration));

    let offset = match declaration {
        Some(decl) => tree.node(decl).span.end,
        None => {
            tracing::debug!(%block, "no declaration in body, using block start + 2");
            tree.node(block).span.start + 2
        }
    };

    // The gate guarantees a CallExpr parent.
    let call = tree.node(node).parent?;
    let params = synthesize_params(tree, resolver, call);
    let target = tree.node_text(node).to_string();
    let text = format!("\n\n{} := func ({}) {{\n}}\n", target, params);

    Some(InsertionPlan {
        target,
        params,
        offset,
        text,
        inserted_lines: INSERTED_LINE_COUNT,
        base_hash: ContentHash::compute(tree.source().as_bytes()),
    })
}

// ============================================================================
// Tests
// ============================================================================
