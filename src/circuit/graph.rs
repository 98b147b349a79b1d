//! Directed branch graph.

use std::collections::HashMap;

use super::types::{Branch, BranchLabel, NodeId};
use crate::error::{Result, TiesetError};

/// A directed multigraph of circuit branches.
///
/// Branches are labelled in the order they are added. The graph keeps both
/// directions of the label mapping: label -> endpoints via [`Self::endpoints`]
/// and endpoints -> label via [`Self::label_of`].
#[derive(Debug, Clone)]
pub struct DirectedGraph {
    /// Number of nodes; valid node ids are `0..node_count`
    node_count: usize,

    /// All branches, indexed by label
    branches: Vec<Branch>,

    /// Outgoing branches per node, in insertion order. Grows with the
    /// highest source node seen, so nodes without branches cost nothing.
    outgoing: Vec<Vec<(NodeId, BranchLabel)>>,

    /// Endpoint pair to label. For parallel branches the latest one wins.
    labels: HashMap<(NodeId, NodeId), BranchLabel>,
}

impl DirectedGraph {
    /// Create a graph with `node_count` nodes and no branches.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            branches: Vec::new(),
            outgoing: Vec::new(),
            labels: HashMap::new(),
        }
    }

    /// Build a graph from one-based `(from, to)` pairs as written in a netlist.
    pub fn from_one_based(node_count: usize, pairs: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::new(node_count);
        for (index, &(from, to)) in pairs.iter().enumerate() {
            let convert = |node: usize| {
                NodeId::from_one_based(node).ok_or_else(|| {
                    TiesetError::malformed_graph(format!(
                        "branch {} endpoint {} is not in 1..={}",
                        BranchLabel(index),
                        node,
                        node_count
                    ))
                })
            };
            graph.add_branch(convert(from)?, convert(to)?)?;
        }
        Ok(graph)
    }

    /// Add a branch and return its label.
    pub fn add_branch(&mut self, from: NodeId, to: NodeId) -> Result<BranchLabel> {
        let label = BranchLabel(self.branches.len());
        for node in [from, to] {
            if node.0 >= self.node_count {
                return Err(TiesetError::malformed_graph(format!(
                    "branch {} endpoint {} is outside a {}-node graph",
                    label, node, self.node_count
                )));
            }
        }

        self.branches.push(Branch { label, from, to });
        if self.outgoing.len() <= from.0 {
            self.outgoing.resize_with(from.0 + 1, Vec::new);
        }
        self.outgoing[from.0].push((to, label));
        self.labels.insert((from, to), label);
        Ok(label)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// All branches in label order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch(&self, label: BranchLabel) -> Option<&Branch> {
        self.branches.get(label.0)
    }

    /// `(from, to)` of a branch.
    pub fn endpoints(&self, label: BranchLabel) -> Option<(NodeId, NodeId)> {
        self.branch(label).map(|b| (b.from, b.to))
    }

    /// Label of the branch `from -> to`, if any.
    pub fn label_of(&self, from: NodeId, to: NodeId) -> Option<BranchLabel> {
        self.labels.get(&(from, to)).copied()
    }

    /// Outgoing `(target, label)` pairs of a node, in insertion order.
    pub fn outgoing(&self, node: NodeId) -> &[(NodeId, BranchLabel)] {
        self.outgoing.get(node.0).map_or(&[], Vec::as_slice)
    }
}
