//! Netlist reader for branch graphs and branch values.
//!
//! The format is a whitespace-separated stream of numbers. Line breaks are
//! not significant, so the same netlist can be typed on one line or spread
//! over many.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist   = topology values
//! topology  = node_count branch_count { from to }
//! values    = { voltage } { current } { resistance }
//! comment   = ('#' | ';') { any_char }
//!
//! node_count, branch_count, from, to = digit+
//! voltage, current, resistance       = number [unit_suffix]
//!
//! number      = ['-' | '+'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! Nodes are numbered from 1. Branch `i` (in input order) gets label `a`,
//! `b`, ... The value rows hold one entry per branch in **tree-then-link**
//! order, which is only known after partitioning the graph.
//!
//! # Example
//!
//! ```text
//! # Single loop: 12V source with three resistors
//! 3 3
//! 1 2
//! 2 3
//! 3 1
//! 12 0 0      ; voltage sources
//! 0 0 0       ; current sources
//! 100 220 680 ; resistances
//! ```

mod lexer;
mod reader;

pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use reader::NetlistReader;

use crate::circuit::DirectedGraph;
use crate::error::Result;
use crate::solver::BranchValues;

/// A fully read netlist.
#[derive(Debug, Clone)]
pub struct Netlist {
    pub graph: DirectedGraph,
    pub values: BranchValues,
}

/// Parse a complete netlist string.
pub fn parse(input: &str) -> Result<Netlist> {
    let mut reader = NetlistReader::new(input.as_bytes());
    let graph = reader.read_topology()?;
    let values = reader.read_values(graph.branch_count())?;
    reader.finish()?;
    Ok(Netlist { graph, values })
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Netlist> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::TiesetError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TiesetError;

    #[test]
    fn test_parse_example() {
        let netlist = parse(
            "# Single loop\n3 3\n1 2\n2 3\n3 1\n12 0 0\n0 0 0\n100 220 680\n",
        )
        .unwrap();
        assert_eq!(netlist.graph.branch_count(), 3);
        assert_eq!(netlist.values.current_sources, vec![0.0; 3]);
    }

    #[test]
    fn test_parse_reports_lexer_error() {
        let result = parse("2 2\n1 2\n2 1\n5 0\n0 0\n1 abc\n");
        assert!(matches!(
            result,
            Err(TiesetError::LexerError { line: 6, column: 3, .. })
        ));
    }

    #[test]
    fn test_parse_oversized_branch_count() {
        assert!(matches!(
            parse("2 18446744073709551615 1 2"),
            Err(TiesetError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_endpoint_outside_graph() {
        assert!(matches!(
            parse("2 1  1 5  0 0 1"),
            Err(TiesetError::MalformedGraph { .. })
        ));
    }

    #[test]
    fn test_parse_zero_nodes() {
        assert!(parse("0 0").is_ok());
    }
}
