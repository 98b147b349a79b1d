//! Tree/link partition of the branch graph.
//!
//! A depth-first search from every unvisited node selects tree branches.
//! When a search reaches a node finished by an earlier root, the edge is
//! kept as a tree branch that joins the two searches, at most once per
//! search call. Every other branch is a link branch.

use std::fmt;

use log::debug;

use super::graph::DirectedGraph;
use super::types::{BranchLabel, NodeId};

/// Branch labels ordered tree branches first, then link branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOrdering {
    order: Vec<BranchLabel>,
    tree_count: usize,
}

impl BranchOrdering {
    /// Build an ordering from tree branches; every other label in
    /// `0..branch_count` becomes a link branch, ascending.
    pub fn from_tree(tree: Vec<BranchLabel>, branch_count: usize) -> Self {
        let mut in_tree = vec![false; branch_count];
        for label in &tree {
            if let Some(slot) = in_tree.get_mut(label.0) {
                *slot = true;
            }
        }

        let tree_count = tree.len();
        let mut order = tree;
        order.extend(
            (0..branch_count)
                .filter(|&i| !in_tree[i])
                .map(BranchLabel),
        );
        Self { order, tree_count }
    }

    /// All labels, tree branches first.
    pub fn labels(&self) -> &[BranchLabel] {
        &self.order
    }

    pub fn tree(&self) -> &[BranchLabel] {
        &self.order[..self.tree_count]
    }

    pub fn links(&self) -> &[BranchLabel] {
        &self.order[self.tree_count..]
    }

    pub fn tree_count(&self) -> usize {
        self.tree_count
    }

    pub fn link_count(&self) -> usize {
        self.order.len() - self.tree_count
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Column of `label` in tree-then-link order.
    pub fn position(&self, label: BranchLabel) -> Option<usize> {
        self.order.iter().position(|&l| l == label)
    }
}

impl fmt::Display for BranchOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Finished,
}

struct Partitioner<'a> {
    graph: &'a DirectedGraph,
    state: Vec<Visit>,
    /// Nodes reached from the current root
    same_component: Vec<bool>,
    tree: Vec<BranchLabel>,
}

impl Partitioner<'_> {
    fn visit(&mut self, source: NodeId, mut allow_link: bool) {
        if self.state[source.0] == Visit::InProgress {
            return;
        }
        self.state[source.0] = Visit::InProgress;
        self.same_component[source.0] = true;

        for &(node, label) in self.graph.outgoing(source) {
            match self.state[node.0] {
                Visit::Unvisited => {
                    debug!("tree branch {} ({} -> {})", label, source, node);
                    self.tree.push(label);
                    self.visit(node, allow_link);
                }
                // Back edge: closes a loop, left for the link set
                Visit::InProgress => {}
                Visit::Finished => {
                    if allow_link && !self.same_component[node.0] {
                        debug!(
                            "branch {} ({} -> {}) joins an earlier component",
                            label, source, node
                        );
                        self.tree.push(label);
                        allow_link = false;
                    }
                }
            }
        }

        self.state[source.0] = Visit::Finished;
    }
}

/// Split the branches of `graph` into tree and link branches.
///
/// For a graph whose nodes are all reachable from node 0 the result has
/// exactly `nodes - 1` tree branches. Graphs that need several roots may
/// end up with a different count; the downstream tree incidence matrix is
/// then not square.
pub fn partition(graph: &DirectedGraph) -> BranchOrdering {
    let node_count = graph.node_count();
    let mut partitioner = Partitioner {
        graph,
        state: vec![Visit::Unvisited; node_count],
        same_component: vec![false; node_count],
        tree: Vec::with_capacity(node_count.saturating_sub(1)),
    };

    for node in 0..node_count {
        if partitioner.state[node] == Visit::Unvisited {
            debug!("new search root {}", NodeId(node));
            partitioner.same_component.fill(false);
            partitioner.visit(NodeId(node), true);
        }
    }

    let ordering = BranchOrdering::from_tree(partitioner.tree, graph.branch_count());
    debug!(
        "partition: {} tree, {} link: {}",
        ordering.tree_count(),
        ordering.link_count(),
        ordering
    );
    ordering
}
