//! Branch graph validation.

use log::warn;

use super::DirectedGraph;
use crate::error::{Result, TiesetError};

/// Validate a branch graph for analysis.
///
/// Checks:
/// - The graph has at least one node
/// - There are enough branches to span every node
///
/// Self-loops are accepted but logged; they never enter the spanning tree.
pub fn validate_graph(graph: &DirectedGraph) -> Result<()> {
    if graph.node_count() == 0 {
        return Err(TiesetError::malformed_graph("graph has no nodes"));
    }

    let needed = graph.node_count() - 1;
    if graph.branch_count() < needed {
        return Err(TiesetError::malformed_graph(format!(
            "{} branches cannot connect {} nodes (need at least {})",
            graph.branch_count(),
            graph.node_count(),
            needed
        )));
    }

    for branch in graph.branches().iter().filter(|b| b.is_self_loop()) {
        warn!("branch {} is a self-loop on {}", branch.label, branch.from);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        assert!(validate_graph(&DirectedGraph::new(0)).is_err());
    }

    #[test]
    fn test_too_few_branches() {
        let graph = DirectedGraph::from_one_based(4, &[(1, 2), (2, 3)]).unwrap();
        assert!(matches!(
            validate_graph(&graph),
            Err(TiesetError::MalformedGraph { .. })
        ));
    }

    #[test]
    fn test_self_loop_is_accepted() {
        let graph = DirectedGraph::from_one_based(2, &[(1, 2), (2, 2)]).unwrap();
        assert!(validate_graph(&graph).is_ok());
    }
}
