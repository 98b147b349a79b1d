//! Lexer (tokenizer) for the netlist format.
//!
//! Reads one line at a time from a [`BufRead`], so tokens become available
//! as soon as their line has been typed.

use std::io::BufRead;

use crate::error::{Result, TiesetError};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Numeric value, with any unit suffix applied
    pub value: f64,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unsigned decimal integer (counts, node numbers)
    Integer,
    /// Any other number, possibly signed, fractional or with a unit suffix
    Number,
}

/// Lexer for tokenizing netlist input.
pub struct Lexer<R> {
    reader: R,
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl<R: BufRead> Lexer<R> {
    /// Create a new lexer for the given input.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chars: Vec::new(),
            pos: 0,
            line: 0,
        }
    }

    /// Current line number (1-indexed, 0 before anything was read).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            self.skip_whitespace_and_comments();

            if self.pos < self.chars.len() {
                let start = self.pos;
                while self.pos < self.chars.len() && !is_separator(self.chars[self.pos]) {
                    self.pos += 1;
                }
                let text: String = self.chars[start..self.pos].iter().collect();
                return self.classify(text, start + 1).map(Some);
            }

            if !self.read_line()? {
                return Ok(None);
            }
        }
    }

    fn read_line(&mut self) -> Result<bool> {
        let mut buffer = String::new();
        if self.reader.read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        self.line += 1;
        self.chars = buffer.chars().collect();
        self.pos = 0;
        Ok(true)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.get(self.pos) {
            if ch == '#' || ch == ';' {
                // Comment runs to end of line
                self.pos = self.chars.len();
            } else if ch.is_whitespace() || ch == ',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn classify(&self, text: String, column: usize) -> Result<Token> {
        let kind = if text.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Integer
        } else {
            TokenKind::Number
        };

        let value = parse_value(&text).ok_or_else(|| {
            TiesetError::lexer(self.line, column, format!("invalid number '{}'", text))
        })?;

        Ok(Token {
            kind,
            text,
            value,
            line: self.line,
            column,
        })
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, ',' | '#' | ';')
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * multiplier)
}
