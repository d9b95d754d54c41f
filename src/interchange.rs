//! Interchange document produced by the external parser.
//!
//! The engine does not parse Go. A host parser serializes its syntax tree —
//! spans, node kinds, literal kinds, qualified flags, and per-expression
//! resolved static type lists — into this document, and the loader rebuilds
//! the arena tree plus a map-backed [`TypeResolver`] from it.
//!
//! Node order is the arena order: `children` entries are indices into
//! `nodes`, node 0 is the root, and all tree invariants are re-validated on
//! load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::edit::Span;
use crate::tree::{LiteralKind, NodeId, NodeKind, SyntaxNode, SyntaxTree, TreeError};
use crate::typesig::{ResolvedType, TypeResolver};

// ============================================================================
// Wire Types
// ============================================================================

/// One node of the serialized tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub kind: NodeKind,
    pub span: Span,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_kind: Option<LiteralKind>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub qualified: bool,
}

/// The complete parser output for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeDocument {
    pub source: String,
    pub nodes: Vec<NodeRecord>,
    /// Resolved static types, keyed by node index.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resolved_types: BTreeMap<u32, Vec<ResolvedType>>,
}

impl TreeDocument {
    /// Parse a document from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rebuild the validated tree and its type resolver.
    pub fn into_parts(self) -> Result<(SyntaxTree, MapResolver), TreeError> {
        let parents = compute_parents(&self.nodes)?;
        let nodes = self
            .nodes
            .into_iter()
            .zip(parents)
            .map(|(record, parent)| SyntaxNode {
                kind: record.kind,
                span: record.span,
                parent,
                children: record.children.into_iter().map(NodeId).collect(),
                literal_kind: record.literal_kind,
                qualified: record.qualified,
            })
            .collect();

        let tree = SyntaxTree::from_parts(self.source, nodes)?;
        let resolver = MapResolver {
            types: self
                .resolved_types
                .into_iter()
                .map(|(index, types)| (NodeId(index), types))
                .collect(),
        };
        Ok((tree, resolver))
    }
}

/// Derive parent links from children lists, rejecting double claims early so
/// tree validation sees consistent links.
fn compute_parents(nodes: &[NodeRecord]) -> Result<Vec<Option<NodeId>>, TreeError> {
    let mut parents: Vec<Option<NodeId>> = vec![None; nodes.len()];
    for (index, record) in nodes.iter().enumerate() {
        for &child in &record.children {
            if child as usize >= nodes.len() {
                return Err(TreeError::ChildOutOfRange {
                    node: index as u32,
                    child,
                });
            }
            if parents[child as usize].is_some() {
                return Err(TreeError::MultipleParents { child });
            }
            parents[child as usize] = Some(NodeId(index as u32));
        }
    }
    Ok(parents)
}

// ============================================================================
// Map-backed Resolver
// ============================================================================

/// The production [`TypeResolver`]: resolved types read straight from the
/// interchange document.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    types: BTreeMap<NodeId, Vec<ResolvedType>>,
}

impl MapResolver {
    pub fn new() -> Self {
        MapResolver::default()
    }

    /// Record resolved types for a node (used by tests and embedders).
    pub fn insert(&mut self, node: NodeId, types: Vec<ResolvedType>) {
        self.types.insert(node, types);
    }
}

impl TypeResolver for MapResolver {
    fn resolve(&self, node: NodeId) -> &[ResolvedType] {
        self.types.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ============================================================================
// Tests
// ============================================================================
