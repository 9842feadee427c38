//! Postfix (reverse-Polish) form of a pattern
//!
//! The parser emits these tokens in post-order and the builder consumes
//! them in the same order. Concatenation is its own variant rather than a
//! marker character, so every character a pattern contains stays a literal.

use std::fmt;

/// One symbol of the postfix sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixToken {
    /// A literal input character
    Literal(char),
    /// Concatenation of the two previous operands
    Concat,
    /// Alternation of the two previous operands
    Alternate,
    /// Zero or more repetitions of the previous operand
    Star,
    /// One or more repetitions of the previous operand
    Plus,
}

impl PostfixToken {
    /// Number of fragments the token pops off the operand stack
    pub fn arity(&self) -> usize {
        match self {
            PostfixToken::Literal(_) => 0,
            PostfixToken::Star | PostfixToken::Plus => 1,
            PostfixToken::Concat | PostfixToken::Alternate => 2,
        }
    }
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixToken::Literal(c) => write!(f, "{}", c),
            PostfixToken::Concat => write!(f, "·"),
            PostfixToken::Alternate => write!(f, "|"),
            PostfixToken::Star => write!(f, "*"),
            PostfixToken::Plus => write!(f, "+"),
        }
    }
}

/// Render a postfix sequence for display, e.g. `ab·*`
pub fn render(tokens: &[PostfixToken]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}
