//! Core types for the branch graph.

use std::fmt;

/// A node in the circuit graph. Zero-based internally, displayed one-based
/// to match the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Convert a one-based netlist node number.
    pub fn from_one_based(node: usize) -> Option<Self> {
        node.checked_sub(1).map(NodeId)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0 + 1)
    }
}

/// Label of a branch, assigned in input order.
///
/// Labels display as `a`, `b`, ..., `z`, `aa`, `ab`, ... so their order
/// is the input order of the branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchLabel(pub usize);

impl BranchLabel {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BranchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bijective base-26
        let mut letters = Vec::new();
        let mut n = self.0 + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'a' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        f.write_str(&String::from_utf8_lossy(&letters))
    }
}

/// A directed branch `from -> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub label: BranchLabel,
    pub from: NodeId,
    pub to: NodeId,
}

impl Branch {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
