//! Plain-text prompts and result report for the CLI frontend.

use std::fmt::{self, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::circuit::BranchOrdering;
use crate::matrix::{Matrix, Scalar};
use crate::solver::Analysis;

/// Decimal places used by the CLI when none are requested.
pub const DEFAULT_PRECISION: usize = 4;

/// A float printed with a fixed number of decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fixed {
    value: f64,
    precision: usize,
}

impl Fixed {
    fn new<T: Scalar>(value: T, precision: usize) -> Self {
        Self {
            value: value.to_f64().unwrap_or(f64::NAN),
            precision,
        }
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1$}", self.value, self.precision)
    }
}

/// Table row for one branch.
#[derive(Debug, Tabled)]
struct BranchRow {
    #[tabled(rename = "Branch")]
    branch: String,
    #[tabled(rename = "Voltage")]
    voltage: Fixed,
    #[tabled(rename = "Current")]
    current: Fixed,
}

/// Prompt describing the topology part of the input.
pub fn input_instructions() -> String {
    [
        "            Simple Electric Circuits Analysis",
        "",
        " Input Specifications:",
        "",
        "   The first line contains two integers N, M",
        "   - The number of nodes and the number of branches in the",
        "   directed graph, correspondingly. Each of the following",
        "   M lines contains two integers u and v (1 <= u, v <= N)",
        "   - The two end points of a branch.",
        "",
        "   Caution: the branches are labelled in input order,",
        "   from 'a' till the end.",
        "",
        " The input:",
        "",
    ]
    .join("\n")
}

/// Prompt listing the order in which branch values must be entered.
pub fn branch_order_hint(ordering: &BranchOrdering) -> String {
    let mut out = format!(
        " Each of the next three lines contains an array of {} values\n   \
         - the voltage sources, the current sources\n   \
         and the resistances on the branches.\n\n   \
         The branches are in the following order:\n",
        ordering.len()
    );
    for title in ["Voltage Sources", "Current Sources", "Resistances    "] {
        let _ = writeln!(out, "\t{}: {}", title, ordering);
    }
    out
}

fn section<T: Scalar>(out: &mut String, title: &str, matrix: &Matrix<T>, precision: usize) {
    let _ = writeln!(out, "{} ({})", title, matrix.shape());
    let _ = writeln!(out, "{:.*}", precision, matrix);
}

/// Render every matrix of an analysis followed by a per-branch table.
pub fn render_report<T: Scalar>(analysis: &Analysis<T>, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Branch order: {}\n", analysis.ordering);

    section(&mut out, "Incidence matrix A", &analysis.incidence, precision);
    section(&mut out, "Tie-set matrix B", &analysis.tie_set, precision);
    section(&mut out, "Cut-set matrix C", &analysis.cut_set, precision);
    section(&mut out, "Loop currents", &analysis.loop_currents, precision);
    section(&mut out, "Branch currents", &analysis.branch_currents, precision);
    section(&mut out, "Branch voltages", &analysis.branch_voltages, precision);

    let rows: Vec<BranchRow> = analysis
        .branch_results()
        .into_iter()
        .map(|result| BranchRow {
            branch: result.label.to_string(),
            voltage: Fixed::new(result.voltage, precision),
            current: Fixed::new(result.current, precision),
        })
        .collect();
    let table = Table::new(rows).with(Style::markdown()).to_string();
    out.push_str(&table);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::DirectedGraph;
    use crate::solver::{Analyzer, BranchValues};

    fn triangle() -> Analysis {
        let graph = DirectedGraph::from_one_based(3, &[(1, 2), (2, 3), (3, 1)]).unwrap();
        let values = BranchValues::new(
            vec![12.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![100.0, 220.0, 680.0],
        );
        Analyzer::new(graph).unwrap().solve(&values).unwrap()
    }

    #[test]
    fn test_fixed_precision() {
        assert_eq!(Fixed::new(0.0123456, 3).to_string(), "0.012");
        assert_eq!(Fixed::new(-2.0f32, 1).to_string(), "-2.0");
    }

    #[test]
    fn test_branch_order_hint_lists_order_three_times() {
        let graph = DirectedGraph::from_one_based(3, &[(3, 1), (1, 2), (2, 3)]).unwrap();
        let analyzer = Analyzer::new(graph).unwrap();
        let hint = branch_order_hint(analyzer.ordering());
        assert!(hint.contains("array of 3 values"));
        assert_eq!(hint.matches(": b c a").count(), 3);
    }

    #[test]
    fn test_report_sections_and_table() {
        let report = render_report(&triangle(), 3);
        for title in [
            "Incidence matrix A (3x3)",
            "Tie-set matrix B (1x3)",
            "Cut-set matrix C (2x3)",
            "Loop currents (1x1)",
            "Branch currents (3x1)",
            "Branch voltages (3x1)",
        ] {
            assert!(report.contains(title), "missing {title}");
        }
        assert!(report.contains("| Branch | Voltage | Current |"));
        assert!(report.contains("0.012"));
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn test_input_instructions_mentions_format() {
        let text = input_instructions();
        assert!(text.contains("N, M"));
        assert!(text.contains("1 <= u, v <= N"));
    }
}
