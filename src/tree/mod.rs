//! Sample aggregation tree
//!
//! A per-owner trie keyed by path components. Each inserted sample adds its
//! weight to the terminal node's own weight and to the cumulative weight of
//! every node on the descent path, so `subtree_weight` always equals
//! `own_weight` plus the sum of the children's subtree weights.
//!
//! Nodes live in an arena indexed by [`NodeId`]; the parent link is a
//! non-owning id, the owning edge is strictly parent -> children. A node
//! removed by [`SampleTree::merge_up`] stays in the arena but is detached and
//! never revisited; arena slots are not reclaimed because a tree is discarded
//! right after rendering.

use crate::error::ReportError;
use std::collections::BTreeMap;

pub mod path;
pub mod prune;
pub mod render;

/// Handle into a [`SampleTree`] arena.
///
/// Ids are assigned in node creation order and never reused, which makes them
/// a deterministic, total tie-break key during pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone)]
struct SampleNode {
    name: String,
    parent: Option<NodeId>,
    children: BTreeMap<String, NodeId>,
    own_weight: u64,
    subtree_weight: u64,
}

impl SampleNode {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: BTreeMap::new(),
            own_weight: 0,
            subtree_weight: 0,
        }
    }
}

/// Weighted path trie for one owner's samples.
#[derive(Debug, Clone)]
pub struct SampleTree {
    nodes: Vec<SampleNode>,
}

impl SampleTree {
    /// Create a tree holding only the root, which has an empty name.
    pub fn new() -> Self {
        Self {
            nodes: vec![SampleNode::new(String::new(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Insert one sample.
    ///
    /// The path is split on `/` with no further normalization: a leading
    /// slash produces an empty-named first component. An empty path is
    /// rejected with [`ReportError::InvalidPath`]; a zero weight with
    /// [`ReportError::InvalidWeight`].
    pub fn insert(&mut self, path: &str, weight: u64) -> Result<(), ReportError> {
        if path.is_empty() {
            return Err(ReportError::InvalidPath(path.to_string()));
        }
        if weight == 0 {
            return Err(ReportError::InvalidWeight(weight));
        }

        let mut current = ROOT;
        self.nodes[current.0].subtree_weight += weight;
        for component in path::segments(path) {
            let next = match self.nodes[current.0].children.get(component) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len());
                    self.nodes
                        .push(SampleNode::new(component.to_string(), Some(current)));
                    self.nodes[current.0]
                        .children
                        .insert(component.to_string(), child);
                    child
                }
            };
            self.nodes[next.0].subtree_weight += weight;
            current = next;
        }
        self.nodes[current.0].own_weight += weight;
        Ok(())
    }

    /// Collapse a node into its parent and return the parent.
    ///
    /// Transfers the node's own weight to the parent and detaches the node,
    /// so the root's subtree weight is invariant across any merge sequence.
    /// The root has no parent and is rejected with
    /// [`ReportError::MergeRoot`]; so is a node that was already merged out.
    pub fn merge_up(&mut self, id: NodeId) -> Result<NodeId, ReportError> {
        let parent = self.nodes[id.0].parent.ok_or(ReportError::MergeRoot)?;
        let weight = self.nodes[id.0].own_weight;
        let name = self.nodes[id.0].name.clone();
        self.nodes[parent.0].own_weight += weight;
        self.nodes[parent.0].children.remove(&name);
        self.nodes[id.0].parent = None;
        Ok(parent)
    }

    /// Lazy, restartable iterator over all childless nodes.
    ///
    /// A single traversal visits each leaf exactly once. The root yields
    /// itself only when it has no children.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            tree: self,
            stack: vec![ROOT],
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn own_weight(&self, id: NodeId) -> u64 {
        self.nodes[id.0].own_weight
    }

    pub fn subtree_weight(&self, id: NodeId) -> u64 {
        self.nodes[id.0].subtree_weight
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node in ascending name order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.values().copied()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    /// Total inserted weight, i.e. the root's subtree weight.
    pub fn total_weight(&self) -> u64 {
        self.nodes[ROOT.0].subtree_weight
    }
}

impl Default for SampleTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit-stack leaf traversal; no recursion, so arbitrarily deep
/// hierarchies are fine.
pub struct Leaves<'a> {
    tree: &'a SampleTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            let node = &self.tree.nodes[id.0];
            if node.children.is_empty() {
                return Some(id);
            }
            self.stack.extend(node.children.values().rev().copied());
        }
        None
    }
}
