//! Error types for the NFA compiler
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are split by their source: parsing the pattern, or assembling
//! the automaton from a postfix sequence.

use crate::postfix::PostfixToken;
use thiserror::Error;

/// The main error type for compiling a pattern
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegexError {
    /// The pattern is not a valid regular expression
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The postfix sequence could not be assembled into a single automaton
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),
}

/// An error in the user's pattern, with the char offset where it was found
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    /// Char offset into the pattern
    pub position: usize,
    /// The specific kind of parse error
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(position: usize, kind: ParseErrorKind) -> Self {
        ParseError { position, kind }
    }
}

/// Specific kinds of parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `(` without a matching `)`
    #[error("unclosed group")]
    UnclosedGroup,

    /// `)` without a matching `(`
    #[error("unmatched `)`")]
    UnmatchedCloseParen,

    /// An operator with nothing before it to apply to
    #[error("operator `{0}` has no operand")]
    DanglingOperator(char),

    /// A binary operator with nothing after it
    #[error("operator `{0}` is missing its right operand")]
    MissingOperand(char),

    /// `()` with nothing inside
    #[error("empty group")]
    EmptyGroup,
}

/// The postfix sequence does not describe exactly one automaton.
///
/// The parser never produces such a sequence, so seeing one of these means
/// the postfix was built by hand or the parser has a bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// An operator needed more fragments than the stack held
    #[error("operator `{op}` needs more operands than the {depth} on the stack")]
    StackUnderflow {
        /// The operator being applied
        op: PostfixToken,
        /// Stack depth when the operator was seen
        depth: usize,
    },

    /// The sequence left more than one fragment behind
    #[error("postfix sequence left {0} fragments on the stack")]
    UnbalancedStack(usize),
}

/// Result type alias for compile operations
pub type Result<T> = std::result::Result<T, RegexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(3, ParseErrorKind::DanglingOperator('*'));
        assert_eq!(err.to_string(), "operator `*` has no operand at position 3");
    }

    #[test]
    fn test_unclosed_group_display() {
        let err = ParseError::new(0, ParseErrorKind::UnclosedGroup);
        assert_eq!(err.to_string(), "unclosed group at position 0");
    }

    #[test]
    fn test_regex_error_from_parse_error() {
        let parse_err = ParseError::new(1, ParseErrorKind::UnmatchedCloseParen);
        let regex_err: RegexError = parse_err.into();
        assert_eq!(
            regex_err.to_string(),
            "parse error: unmatched `)` at position 1"
        );
    }

    #[test]
    fn test_construction_error_display() {
        let err = ConstructionError::StackUnderflow {
            op: PostfixToken::Concat,
            depth: 1,
        };
        assert_eq!(
            err.to_string(),
            "operator `·` needs more operands than the 1 on the stack"
        );

        let regex_err: RegexError = ConstructionError::UnbalancedStack(2).into();
        assert_eq!(
            regex_err.to_string(),
            "construction error: postfix sequence left 2 fragments on the stack"
        );
    }
}
