//! Arena syntax tree for Go sources.
//!
//! The tree is produced by an external parser and consumed read-only here.
//! Nodes live in a flat owned arena; parent and children are [`NodeId`]
//! indices, giving O(1) upward walks without ownership cycles.
//!
//! # Invariants
//!
//! Enforced at construction ([`TreeBuilder::finish`] /
//! [`SyntaxTree::from_parts`]), never re-checked at query time:
//!
//! - every node's span is contained within its parent's span
//! - sibling spans are non-overlapping and in source order
//! - node 0 is the root; every other node has exactly one parent

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::edit::Span;

// ============================================================================
// Node Identity and Kinds
// ============================================================================

/// Index of a node within its tree's arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// Syntactic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    SourceFile,
    FunctionDecl,
    BlockStmt,
    /// Grouped `var (...)` declaration block.
    VarDeclarations,
    VarDeclaration,
    ShortVarDeclaration,
    ExprStmt,
    CallExpr,
    /// Expression wrapping a single literal (identifier or constant).
    LiteralExpr,
    Literal,
    Identifier,
    CompositeLit,
    FunctionLit,
    Parameters,
    Results,
    Parameter,
    TypeRef,
    Operator,
}

/// Literal-kind classification supplied by the parser, used as the
/// primitive-type fallback when rendering argument types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    Bool,
    Int,
    Float,
    Imaginary,
    Char,
    String,
    Identifier,
}

impl LiteralKind {
    /// Lower-cased kind name, rendered as the inferred primitive type.
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralKind::Bool => "bool",
            LiteralKind::Int => "int",
            LiteralKind::Float => "float",
            LiteralKind::Imaginary => "imaginary",
            LiteralKind::Char => "char",
            LiteralKind::String => "string",
            LiteralKind::Identifier => "identifier",
        }
    }
}

// ============================================================================
// Nodes and Tree
// ============================================================================

/// A single node of the arena tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Literal-kind classification (literals and identifiers only).
    pub literal_kind: Option<LiteralKind>,
    /// Whether an identifier carries a package qualifier (`fmt.Println`).
    pub qualified: bool,
}

/// Tree invariant violations detected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("root node must not have a parent")]
    RootHasParent,

    #[error("node {node} span {span} is inverted or exceeds source length {len}")]
    InvalidSpan { node: u32, span: String, len: usize },

    #[error("node {node} references child {child} out of range")]
    ChildOutOfRange { node: u32, child: u32 },

    #[error("node {child} is claimed by more than one parent")]
    MultipleParents { child: u32 },

    #[error("node {node} is not reachable from the root")]
    Unreachable { node: u32 },

    #[error("child {child} span escapes its parent {parent} span")]
    SpanEscapesParent { parent: u32, child: u32 },

    #[error("children of node {parent} overlap or are out of source order")]
    SiblingOrder { parent: u32 },
}

/// An immutable, per-snapshot syntax tree over one source text.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Assemble a tree from pre-wired nodes, validating all invariants.
    ///
    /// `parent` links must agree with `children` lists; node 0 is the root.
    pub fn from_parts(source: String, nodes: Vec<SyntaxNode>) -> Result<Self, TreeError> {
        let tree = SyntaxTree { source, nodes };
        tree.validate()?;
        Ok(tree)
    }

    fn validate(&self) -> Result<(), TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        if self.nodes[0].parent.is_some() {
            return Err(TreeError::RootHasParent);
        }

        let len = self.nodes.len() as u32;
        let mut claimed = vec![false; self.nodes.len()];

        for (index, node) in self.nodes.iter().enumerate() {
            let index = index as u32;
            if node.span.start > node.span.end || node.span.end > self.source.len() {
                return Err(TreeError::InvalidSpan {
                    node: index,
                    span: format!("[{}, {})", node.span.start, node.span.end),
                    len: self.source.len(),
                });
            }

            let mut prev_end: Option<usize> = None;
            for &child in &node.children {
                if child.0 >= len {
                    return Err(TreeError::ChildOutOfRange {
                        node: index,
                        child: child.0,
                    });
                }
                let child_node = &self.nodes[child.0 as usize];
                if claimed[child.0 as usize] || child_node.parent != Some(NodeId(index)) {
                    return Err(TreeError::MultipleParents { child: child.0 });
                }
                claimed[child.0 as usize] = true;

                if !node.span.contains(&child_node.span) {
                    return Err(TreeError::SpanEscapesParent {
                        parent: index,
                        child: child.0,
                    });
                }
                if let Some(end) = prev_end {
                    if child_node.span.start < end {
                        return Err(TreeError::SiblingOrder { parent: index });
                    }
                }
                prev_end = Some(child_node.span.end);
            }
        }

        for (index, was_claimed) in claimed.iter().enumerate().skip(1) {
            if !was_claimed {
                return Err(TreeError::Unreachable {
                    node: index as u32,
                });
            }
        }
        Ok(())
    }

    /// The root node (always index 0).
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The source text this tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Look up a node. `id` must come from this tree.
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0 as usize]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A validated tree is never empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The source text covered by a node's span.
    pub fn node_text(&self, id: NodeId) -> &str {
        let span = self.node(id).span;
        &self.source[span.start..span.end]
    }

    /// Ordered children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Walk parent links upward from `node` (exclusive) until a node of
    /// `kind` is found. `None` means not found, which is not an error.
    pub fn ancestor_of_kind(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = self.node(node).parent;
        while let Some(id) = current {
            if self.node(id).kind == kind {
                return Some(id);
            }
            current = self.node(id).parent;
        }
        None
    }

    /// Depth-first, pre-order search of `node`'s subtree (exclusive) for the
    /// first node of `kind`. Children are visited in source order, so the
    /// result is deterministic.
    pub fn first_descendant_of_kind(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        for &child in self.children(node) {
            if self.node(child).kind == kind {
                return Some(child);
            }
            if let Some(found) = self.first_descendant_of_kind(child, kind) {
                return Some(found);
            }
        }
        None
    }

    /// The deepest node whose span contains the byte offset.
    pub fn node_at_offset(&self, offset: usize) -> Option<NodeId> {
        let root = self.root();
        if !self.node(root).span.contains_offset(offset) {
            return None;
        }
        let mut current = root;
        'descend: loop {
            for &child in self.children(current) {
                if self.node(child).span.contains_offset(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// The nearest enclosing literal-expression at the byte offset — the
    /// node a quick-fix request addresses.
    pub fn literal_expression_at(&self, offset: usize) -> Option<NodeId> {
        let mut current = self.node_at_offset(offset);
        while let Some(id) = current {
            if self.node(id).kind == NodeKind::LiteralExpr {
                return Some(id);
            }
            current = self.node(id).parent;
        }
        None
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Incremental tree construction, used by the interchange loader and tests.
#[derive(Debug)]
pub struct TreeBuilder {
    source: String,
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        TreeBuilder {
            source: source.into(),
            nodes: Vec::new(),
        }
    }

    /// Append a node; it becomes the last child of `parent` when given.
    pub fn node(
        &mut self,
        kind: NodeKind,
        span: (usize, usize),
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            span: Span::new(span.0, span.1),
            parent,
            children: Vec::new(),
            literal_kind: None,
            qualified: false,
        });
        if let Some(p) = parent {
            self.nodes[p.0 as usize].children.push(id);
        }
        id
    }

    /// Append a literal node carrying a literal-kind classification.
    pub fn literal(
        &mut self,
        kind: NodeKind,
        span: (usize, usize),
        parent: Option<NodeId>,
        literal_kind: LiteralKind,
    ) -> NodeId {
        let id = self.node(kind, span, parent);
        self.nodes[id.0 as usize].literal_kind = Some(literal_kind);
        id
    }

    /// Mark an identifier node as package-qualified.
    pub fn mark_qualified(&mut self, id: NodeId) {
        self.nodes[id.0 as usize].qualified = true;
    }

    /// Validate invariants and produce the immutable tree.
    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        SyntaxTree::from_parts(self.source, self.nodes)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// `func main() {\n\tx := 1\n}\n` with a short var declaration.
    fn small_tree() -> SyntaxTree {
        let src = "func main() {\n\tx := 1\n}\n";
        let mut b = TreeBuilder::new(src);
        let root = b.node(NodeKind::SourceFile, (0, src.len()), None);
        let func = b.node(NodeKind::FunctionDecl, (0, 23), Some(root));
        let block = b.node(NodeKind::BlockStmt, (12, 23), Some(func));
        let decl = b.node(NodeKind::ShortVarDeclaration, (15, 21), Some(block));
        b.literal(NodeKind::Identifier, (15, 16), Some(decl), LiteralKind::Int);
        b.literal(NodeKind::Literal, (20, 21), Some(decl), LiteralKind::Int);
        b.finish().unwrap()
    }

    mod accessor_tests {
        use super::*;

        #[test]
        fn ancestor_walks_upward() {
            let tree = small_tree();
            let decl = NodeId(3);
            assert_eq!(
                tree.ancestor_of_kind(decl, NodeKind::FunctionDecl),
                Some(NodeId(1))
            );
            assert_eq!(
                tree.ancestor_of_kind(decl, NodeKind::SourceFile),
                Some(NodeId(0))
            );
        }

        #[test]
        fn ancestor_excludes_self_and_reports_not_found() {
            let tree = small_tree();
            let func = NodeId(1);
            // func is itself a FunctionDecl; the walk starts at its parent.
            assert_eq!(tree.ancestor_of_kind(func, NodeKind::FunctionDecl), None);
            assert_eq!(tree.ancestor_of_kind(NodeId(0), NodeKind::BlockStmt), None);
        }

        #[test]
        fn first_descendant_is_preorder_source_order() {
            let tree = small_tree();
            assert_eq!(
                tree.first_descendant_of_kind(NodeId(0), NodeKind::ShortVarDeclaration),
                Some(NodeId(3))
            );
            assert_eq!(
                tree.first_descendant_of_kind(NodeId(0), NodeKind::Identifier),
                Some(NodeId(4))
            );
            assert_eq!(
                tree.first_descendant_of_kind(NodeId(0), NodeKind::VarDeclarations),
                None
            );
        }

        #[test]
        fn node_at_offset_finds_deepest() {
            let tree = small_tree();
            assert_eq!(tree.node_at_offset(15), Some(NodeId(4)));
            assert_eq!(tree.node_at_offset(20), Some(NodeId(5)));
            // Offset in the block but outside any statement.
            assert_eq!(tree.node_at_offset(13), Some(NodeId(2)));
            assert_eq!(tree.node_at_offset(1000), None);
        }

        #[test]
        fn node_text_slices_source() {
            let tree = small_tree();
            assert_eq!(tree.node_text(NodeId(3)), "x := 1");
            assert_eq!(tree.node_text(NodeId(4)), "x");
        }
    }

    mod invariant_tests {
        use super::*;

        #[test]
        fn empty_tree_rejected() {
            let b = TreeBuilder::new("x");
            assert_eq!(b.finish().unwrap_err(), TreeError::Empty);
        }

        #[test]
        fn child_span_must_stay_inside_parent() {
            let mut b = TreeBuilder::new("0123456789");
            let root = b.node(NodeKind::SourceFile, (0, 5), None);
            b.node(NodeKind::Identifier, (3, 8), Some(root));
            assert!(matches!(
                b.finish().unwrap_err(),
                TreeError::SpanEscapesParent { .. }
            ));
        }

        #[test]
        fn siblings_must_be_ordered() {
            let mut b = TreeBuilder::new("0123456789");
            let root = b.node(NodeKind::SourceFile, (0, 10), None);
            b.node(NodeKind::Identifier, (5, 8), Some(root));
            b.node(NodeKind::Identifier, (1, 4), Some(root));
            assert!(matches!(
                b.finish().unwrap_err(),
                TreeError::SiblingOrder { .. }
            ));
        }

        #[test]
        fn overlapping_siblings_rejected() {
            let mut b = TreeBuilder::new("0123456789");
            let root = b.node(NodeKind::SourceFile, (0, 10), None);
            b.node(NodeKind::Identifier, (1, 5), Some(root));
            b.node(NodeKind::Identifier, (4, 8), Some(root));
            assert!(matches!(
                b.finish().unwrap_err(),
                TreeError::SiblingOrder { .. }
            ));
        }

        #[test]
        fn span_past_source_rejected() {
            let mut b = TreeBuilder::new("ab");
            b.node(NodeKind::SourceFile, (0, 5), None);
            assert!(matches!(
                b.finish().unwrap_err(),
                TreeError::InvalidSpan { .. }
            ));
        }

        #[test]
        fn orphan_node_rejected() {
            let src = "0123456789";
            let nodes = vec![
                SyntaxNode {
                    kind: NodeKind::SourceFile,
                    span: Span::new(0, 10),
                    parent: None,
                    children: vec![],
                    literal_kind: None,
                    qualified: false,
                },
                SyntaxNode {
                    kind: NodeKind::Identifier,
                    span: Span::new(0, 1),
                    parent: Some(NodeId(0)),
                    children: vec![],
                    literal_kind: None,
                    qualified: false,
                },
            ];
            assert!(matches!(
                SyntaxTree::from_parts(src.to_string(), nodes).unwrap_err(),
                TreeError::Unreachable { node: 1 }
            ));
        }
    }

    mod literal_expression_tests {
        use super::*;

        #[test]
        fn finds_wrapping_literal_expression() {
            let src = "f(x)";
            let mut b = TreeBuilder::new(src);
            let root = b.node(NodeKind::SourceFile, (0, 4), None);
            let call = b.node(NodeKind::CallExpr, (0, 4), Some(root));
            let callee = b.node(NodeKind::LiteralExpr, (0, 1), Some(call));
            b.literal(NodeKind::Identifier, (0, 1), Some(callee), LiteralKind::Identifier);
            let tree = b.finish().unwrap();

            assert_eq!(tree.literal_expression_at(0), Some(NodeId(2)));
            // Offset 1 is the '(' — inside the call but no literal expression.
            assert_eq!(tree.literal_expression_at(1), None);
        }
    }
}
