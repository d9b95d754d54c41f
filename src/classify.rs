//! Expression shape classification and the synthesis legality gate.
//!
//! Classification never fails: unrecognized shapes map to
//! [`ExpressionShape::Other`], which renderers handle with a generic
//! placeholder type.

use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// The syntactic shape of an expression, recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionShape {
    /// A bare identifier.
    Identifier,
    /// A composite literal constructing a struct/array/map/slice value.
    CompositeLiteral,
    /// An address-of expression (`&expr`), wrapping its operand's shape.
    PointerOf(Box<ExpressionShape>),
    /// A function literal.
    FunctionLiteral,
    /// A call or conversion expression.
    Call,
    /// Everything else (plain literals, unrecognized forms).
    Other,
}

/// Classify an expression by its head (first child, or the node itself for
/// childless nodes).
pub fn classify(tree: &SyntaxTree, expr: NodeId) -> ExpressionShape {
    let children = tree.children(expr);
    let head = children.first().copied().unwrap_or(expr);
    match tree.node(head).kind {
        NodeKind::Identifier => ExpressionShape::Identifier,
        NodeKind::CompositeLit => ExpressionShape::CompositeLiteral,
        NodeKind::FunctionLit => ExpressionShape::FunctionLiteral,
        NodeKind::CallExpr => ExpressionShape::Call,
        NodeKind::Operator if tree.node_text(head) == "&" => {
            let inner = children
                .get(1)
                .map(|&operand| leaf_shape(tree, operand))
                .unwrap_or(ExpressionShape::Other);
            ExpressionShape::PointerOf(Box::new(inner))
        }
        _ => ExpressionShape::Other,
    }
}

fn leaf_shape(tree: &SyntaxTree, node: NodeId) -> ExpressionShape {
    match tree.node(node).kind {
        NodeKind::Identifier => ExpressionShape::Identifier,
        NodeKind::CompositeLit => ExpressionShape::CompositeLiteral,
        NodeKind::FunctionLit => ExpressionShape::FunctionLiteral,
        NodeKind::CallExpr => ExpressionShape::Call,
        _ => ExpressionShape::Other,
    }
}

/// The legality gate for closure synthesis.
///
/// True iff all four hold: the node is a literal expression wrapping an
/// identifier, the identifier is unqualified, the immediate parent is a call
/// expression, and the node is the callee (offset zero within the parent).
pub fn is_synthesizable_call_head(tree: &SyntaxTree, node: NodeId) -> bool {
    let expr = tree.node(node);
    if expr.kind != NodeKind::LiteralExpr {
        return false;
    }

    let Some(&literal) = expr.children.first() else {
        return false;
    };
    let literal = tree.node(literal);
    if literal.kind != NodeKind::Identifier {
        return false;
    }
    if literal.qualified {
        return false;
    }

    let Some(parent) = expr.parent else {
        return false;
    };
    let parent = tree.node(parent);
    if parent.kind != NodeKind::CallExpr {
        return false;
    }

    // The callee is the first element of its parent.
    expr.span.start == parent.span.start
}

// ============================================================================
// Tests
// ============================================================================
