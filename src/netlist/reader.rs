//! Streaming reader for netlists.

use std::io::BufRead;

use log::{debug, trace};

use super::lexer::{Lexer, Token, TokenKind};
use crate::circuit::DirectedGraph;
use crate::error::{Result, TiesetError};
use crate::solver::BranchValues;

/// Reads a netlist in two steps: topology first, then branch values.
///
/// The values can only be entered once the branch order is known, so an
/// interactive caller reads the topology, partitions the graph, shows the
/// order and only then calls [`NetlistReader::read_values`].
pub struct NetlistReader<R> {
    lexer: Lexer<R>,
}

impl<R: BufRead> NetlistReader<R> {
    /// Create a new reader over the given input.
    pub fn new(reader: R) -> Self {
        Self {
            lexer: Lexer::new(reader),
        }
    }

    /// Read the node count, branch count and one `from to` pair per branch.
    ///
    /// Endpoints outside `1..=nodes` are reported by the graph as
    /// `MalformedGraph`. Counts larger than the input are reported as a
    /// `ParseError` once the input runs out.
    pub fn read_topology(&mut self) -> Result<DirectedGraph> {
        let node_count = self.expect_integer("node count")?;
        let branch_count = self.expect_integer("branch count")?;
        debug!("reading {} branches over {} nodes", branch_count, node_count);

        let mut pairs = Vec::new();
        for _ in 0..branch_count {
            let from = self.expect_integer("branch endpoint")?;
            let to = self.expect_integer("branch endpoint")?;
            pairs.push((from, to));
        }

        DirectedGraph::from_one_based(node_count, &pairs)
    }

    /// Read three rows of `branch_count` numbers: voltage sources, current
    /// sources and resistances, each in tree-then-link order.
    pub fn read_values(&mut self, branch_count: usize) -> Result<BranchValues> {
        let voltage_sources = self.expect_row("voltage source", branch_count)?;
        let current_sources = self.expect_row("current source", branch_count)?;
        let resistances = self.expect_row("resistance", branch_count)?;
        Ok(BranchValues::new(voltage_sources, current_sources, resistances))
    }

    /// Check that nothing but whitespace and comments remains.
    pub fn finish(mut self) -> Result<()> {
        match self.lexer.next_token()? {
            None => Ok(()),
            Some(token) => Err(TiesetError::parse(
                token.line,
                format!("unexpected trailing input '{}'", token.text),
            )),
        }
    }

    fn expect_token(&mut self, what: &str) -> Result<Token> {
        let token = self.lexer.next_token()?.ok_or_else(|| {
            TiesetError::parse(
                self.lexer.line(),
                format!("unexpected end of input, expected {}", what),
            )
        })?;
        trace!("{} = '{}' at {}:{}", what, token.text, token.line, token.column);
        Ok(token)
    }

    fn expect_integer(&mut self, what: &str) -> Result<usize> {
        let token = self.expect_token(what)?;
        if token.kind != TokenKind::Integer {
            return Err(TiesetError::parse(
                token.line,
                format!("expected {} as a non-negative integer, got '{}'", what, token.text),
            ));
        }
        token.text.parse::<usize>().map_err(|_| {
            TiesetError::parse(token.line, format!("{} '{}' is too large", what, token.text))
        })
    }

    fn expect_row(&mut self, what: &str, count: usize) -> Result<Vec<f64>> {
        (0..count)
            .map(|_| self.expect_token(what).map(|token| token.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_topology_then_values() {
        let input = "3 3\n1 2\n2 3\n3 1\n12 0 0\n0 0 0\n100 220 680\n";
        let mut reader = NetlistReader::new(input.as_bytes());

        let graph = reader.read_topology().unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.branch_count(), 3);

        let values = reader.read_values(3).unwrap();
        assert_eq!(values.voltage_sources, vec![12.0, 0.0, 0.0]);
        assert_eq!(values.resistances, vec![100.0, 220.0, 680.0]);
        reader.finish().unwrap();
    }

    #[test]
    fn test_values_accept_suffixes_and_free_layout() {
        let input = "2 2 1 2 2 1\n5 0, 0 0 ; sources\n1k 2.2k";
        let mut reader = NetlistReader::new(input.as_bytes());
        reader.read_topology().unwrap();
        let values = reader.read_values(2).unwrap();
        assert_eq!(values.resistances, vec![1000.0, 2200.0]);
    }

    #[test]
    fn test_truncated_input() {
        let mut reader = NetlistReader::new("3 3\n1 2\n2".as_bytes());
        match reader.read_topology() {
            Err(TiesetError::ParseError { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("end of input"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_node_out_of_range() {
        let mut reader = NetlistReader::new("2 1\n1 5\n".as_bytes());
        assert!(matches!(
            reader.read_topology(),
            Err(TiesetError::MalformedGraph { .. })
        ));

        let mut reader = NetlistReader::new("2 1  0 1".as_bytes());
        assert!(matches!(
            reader.read_topology(),
            Err(TiesetError::MalformedGraph { .. })
        ));
    }

    #[test]
    fn test_branch_count_larger_than_input() {
        let mut reader = NetlistReader::new("2 18446744073709551615 1 2".as_bytes());
        assert!(matches!(
            reader.read_topology(),
            Err(TiesetError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_node_count_larger_than_input() {
        let mut reader = NetlistReader::new("18446744073709551615 1 1 2".as_bytes());
        let graph = reader.read_topology().unwrap();
        assert_eq!(graph.branch_count(), 1);
    }

    #[test]
    fn test_fractional_count_rejected() {
        let mut reader = NetlistReader::new("2.5 1".as_bytes());
        assert!(matches!(
            reader.read_topology(),
            Err(TiesetError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_trailing_input_rejected() {
        let mut reader = NetlistReader::new("2 1 1 2 0 0 1 7".as_bytes());
        reader.read_topology().unwrap();
        reader.read_values(1).unwrap();
        assert!(reader.finish().is_err());
    }
}
