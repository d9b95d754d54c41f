//! Type-signature rendering following Go's declaration grammar.
//!
//! Static type resolution is an external capability: the engine asks a
//! [`TypeResolver`] for an expression's resolved type list and renders text
//! from whatever comes back. An empty list renders the generic placeholder —
//! a hard guard, never an index into an empty sequence.

use serde::{Deserialize, Serialize};

use crate::classify::ExpressionShape;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Generic placeholder emitted when no more specific type can be rendered.
pub const TYPE_PLACEHOLDER: &str = "interface{}";

// ============================================================================
// Resolved Types
// ============================================================================

/// A statically resolved type, as reported by the external resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedType {
    /// A named type (`Foo`, `int`).
    Named { name: String },
    /// A pointer type; `pointee` is the target type name.
    Pointer { pointee: String },
    /// A slice type; `elem` is the element-type text.
    Slice { elem: String },
}

/// Capability: per-expression static type resolution.
///
/// Implemented by the interchange loader in production and by stubs in
/// tests; the engine itself never resolves types.
pub trait TypeResolver {
    /// Resolved static types for an expression node, possibly empty.
    fn resolve(&self, node: NodeId) -> &[ResolvedType];
}

/// A resolver that resolves nothing, for contexts without type information.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl TypeResolver for NullResolver {
    fn resolve(&self, _node: NodeId) -> &[ResolvedType] {
        &[]
    }
}

// ============================================================================
// Function Literal Signatures
// ============================================================================

/// Parameter and result type texts of a function literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionLiteralSignature {
    pub params: Vec<String>,
    pub results: Vec<String>,
}

impl FunctionLiteralSignature {
    /// Read the declared parameter/result lists off a FunctionLit node.
    ///
    /// A parameter without a resolvable type text contributes the
    /// placeholder rather than failing.
    pub fn from_function_lit(tree: &SyntaxTree, lit: NodeId) -> Self {
        FunctionLiteralSignature {
            params: list_types(tree, lit, NodeKind::Parameters),
            results: list_types(tree, lit, NodeKind::Results),
        }
    }
}

fn list_types(tree: &SyntaxTree, lit: NodeId, list_kind: NodeKind) -> Vec<String> {
    let Some(list) = tree
        .children(lit)
        .iter()
        .copied()
        .find(|&c| tree.node(c).kind == list_kind)
    else {
        return Vec::new();
    };
    tree.children(list)
        .iter()
        .filter(|&&c| tree.node(c).kind == NodeKind::Parameter)
        .map(|&param| parameter_type_text(tree, param))
        .collect()
}

fn parameter_type_text(tree: &SyntaxTree, param: NodeId) -> String {
    match tree
        .children(param)
        .iter()
        .copied()
        .find(|&c| tree.node(c).kind == NodeKind::TypeRef)
    {
        Some(type_ref) => tree.node_text(type_ref).to_string(),
        None => {
            tracing::debug!(%param, "parameter without a type, using placeholder");
            TYPE_PLACEHOLDER.to_string()
        }
    }
}

/// Render `func(T1,T2,...)` plus, only for non-empty results,
/// `(R1,R2,...)` — zero-result signatures omit the trailing parens entirely.
pub fn render_function_literal_type(sig: &FunctionLiteralSignature) -> String {
    let mut out = String::from("func(");
    for (i, param) in sig.params.iter().enumerate() {
        if i != 0 {
            out.push(',');
        }
        out.push_str(param);
    }
    out.push(')');

    for (i, result) in sig.results.iter().enumerate() {
        if i == 0 {
            out.push('(');
        } else {
            out.push(',');
        }
        out.push_str(result);
    }
    if !sig.results.is_empty() {
        out.push(')');
    }

    out
}

// ============================================================================
// Expression Type Rendering
// ============================================================================

/// Render the textual type signature of a classified expression.
pub fn render_expression_type(
    tree: &SyntaxTree,
    resolver: &dyn TypeResolver,
    shape: &ExpressionShape,
    expr: NodeId,
) -> String {
    match shape {
        ExpressionShape::Identifier => literal_kind_fallback(tree, expr),
        ExpressionShape::CompositeLiteral => composite_type_text(tree, resolver, expr, false),
        ExpressionShape::PointerOf(_) => composite_type_text(tree, resolver, expr, true),
        ExpressionShape::FunctionLiteral => {
            let lit = function_lit_node(tree, expr);
            render_function_literal_type(&FunctionLiteralSignature::from_function_lit(tree, lit))
        }
        ExpressionShape::Call | ExpressionShape::Other => literal_kind_fallback(tree, expr),
    }
}

fn function_lit_node(tree: &SyntaxTree, expr: NodeId) -> NodeId {
    let head = tree.children(expr).first().copied().unwrap_or(expr);
    if tree.node(head).kind == NodeKind::FunctionLit {
        head
    } else {
        expr
    }
}

fn composite_type_text(
    tree: &SyntaxTree,
    resolver: &dyn TypeResolver,
    expr: NodeId,
    pointer: bool,
) -> String {
    let types = resolver.resolve(expr);
    let Some(first) = types.first() else {
        tracing::debug!(
            expr = %tree.node_text(expr),
            "no resolved static types, using placeholder"
        );
        return TYPE_PLACEHOLDER.to_string();
    };
    match first {
        ResolvedType::Slice { elem } => elem.clone(),
        ResolvedType::Named { name } => {
            if pointer {
                format!("*{}", name)
            } else {
                name.clone()
            }
        }
        ResolvedType::Pointer { pointee } => format!("*{}", pointee),
    }
}

fn literal_kind_fallback(tree: &SyntaxTree, expr: NodeId) -> String {
    let head = tree.children(expr).first().copied().unwrap_or(expr);
    match tree
        .node(head)
        .literal_kind
        .or_else(|| tree.node(expr).literal_kind)
    {
        Some(kind) => kind.type_name().to_string(),
        None => {
            tracing::debug!(
                expr = %tree.node_text(expr),
                "expression carries no literal kind, using placeholder"
            );
            TYPE_PLACEHOLDER.to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
