//! Lexer for tokenizing regex patterns
//!
//! This module provides a tokenizer that converts a pattern string into a
//! stream of positioned tokens for the parser. Only `(`, `)`, `|`, `*` and `+`
//! are operators; every other character is a literal.

use std::fmt;
use std::str::Chars;

/// A token in a regex pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Pipe `|` (alternation)
    Pipe,
    /// Star `*` (zero or more)
    Star,
    /// Plus `+` (one or more)
    Plus,
    /// A literal character
    Literal(char),
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => write!(f, "`(`"),
            Token::RightParen => write!(f, "`)`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Star => write!(f, "`*`"),
            Token::Plus => write!(f, "`+`"),
            Token::Literal(c) => write!(f, "literal `{}`", c),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// A token together with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: Token,
    /// Char offset of the token; for `Eof`, the length of the input
    pub position: usize,
}

/// Lexer for tokenizing regex patterns
pub struct Lexer<'a> {
    chars: Chars<'a>,
    /// Char offset of the next character
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input string
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars(),
            position: 0,
        }
    }

    /// Get the next token from the input
    ///
    /// Once the input is exhausted this keeps returning `Eof`.
    pub fn next_token(&mut self) -> PositionedToken {
        let start = self.position;
        let token = match self.chars.next() {
            None => {
                return PositionedToken {
                    token: Token::Eof,
                    position: start,
                };
            }
            Some('(') => Token::LeftParen,
            Some(')') => Token::RightParen,
            Some('|') => Token::Pipe,
            Some('*') => Token::Star,
            Some('+') => Token::Plus,
            Some(c) => Token::Literal(c),
        };
        self.position += 1;

        PositionedToken {
            token,
            position: start,
        }
    }

    /// Tokenize the entire input, ending with `Eof`
    pub fn tokenize(&mut self) -> Vec<PositionedToken> {
        let mut tokens = Vec::new();
        loop {
            let next = self.next_token();
            let done = next.token == Token::Eof;
            tokens.push(next);
            if done {
                break;
            }
        }
        tokens
    }
}
