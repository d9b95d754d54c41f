//! Synthetic formal parameter lists from a call's actual arguments.

use crate::classify::classify;
use crate::tree::{NodeId, SyntaxTree};
use crate::typesig::{render_expression_type, TypeResolver};

/// The ordered argument expressions of a call (everything after the callee).
pub fn call_arguments(tree: &SyntaxTree, call: NodeId) -> &[NodeId] {
    let children = tree.children(call);
    if children.is_empty() {
        children
    } else {
        &children[1..]
    }
}

/// Generate a formal parameter list from the call's actual arguments,
/// e.g. `arg0 int,arg1 string`.
///
/// Indices are zero-based and contiguous in source order; each argument is
/// typed by classifying its own head expression.
pub fn synthesize_params(
    tree: &SyntaxTree,
    resolver: &dyn TypeResolver,
    call: NodeId,
) -> String {
    let mut out = String::new();
    for (i, &arg) in call_arguments(tree, call).iter().enumerate() {
        if i != 0 {
            out.push(',');
        }
        out.push_str("arg");
        out.push_str(&i.to_string());
        out.push(' ');
        let shape = classify(tree, arg);
        out.push_str(&render_expression_type(tree, resolver, &shape, arg));
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
