//! Error types for the tie-set circuit analyzer.
//!
//! This module provides a unified error type [`TiesetError`] that covers
//! all error conditions that can occur while reading a netlist, building the
//! branch graph, and running the matrix pipeline.

use thiserror::Error;

use crate::matrix::Shape;

/// Result type alias using [`TiesetError`].
pub type Result<T> = std::result::Result<T, TiesetError>;

/// Unified error type for all tie-set analysis operations.
#[derive(Error, Debug)]
pub enum TiesetError {
    // ============ Matrix Errors ============
    /// Operand shapes are incompatible for the requested operation
    #[error("Dimension mismatch in {operation}: {left} vs {right}")]
    DimensionMismatch {
        operation: &'static str,
        left: Shape,
        right: Shape,
    },

    /// Element index outside the matrix bounds
    #[error("Index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Inversion requested on a non-invertible operand
    #[error("Singular matrix - the branch graph has no spanning tree or no independent loop")]
    SingularMatrix,

    // ============ Graph Errors ============
    /// Branch endpoints or counts that do not describe a usable graph
    #[error("Malformed graph: {message}")]
    MalformedGraph { message: String },

    // ============ Netlist Errors ============
    /// Error while splitting the input into tokens
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed tokens in the wrong place, or input ended early
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    // ============ I/O Errors ============
    /// Error opening the netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading the input stream
    #[error("Input error: {0}")]
    InputError(#[from] std::io::Error),
}

impl TiesetError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(operation: &'static str, left: Shape, right: Shape) -> Self {
        Self::DimensionMismatch {
            operation,
            left,
            right,
        }
    }

    /// Create a malformed graph error
    pub fn malformed_graph(message: impl Into<String>) -> Self {
        Self::MalformedGraph {
            message: message.into(),
        }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }
}
