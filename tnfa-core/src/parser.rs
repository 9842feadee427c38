//! Parser for regex patterns
//!
//! This module converts tokens directly into a postfix sequence. Each
//! operator is emitted after its operands, so no syntax tree is built.
//!
//! Grammar (in order of precedence, lowest to highest):
//!   regex       := ε | alternation EOF
//!   alternation := concat ( '|' concat )*
//!   concat      := closure closure*
//!   closure     := primary ( '*' | '+' )*
//!   primary     := literal | '(' alternation ')'
//!
//! Concatenation is implicit: it is emitted whenever a term is followed by
//! another token that starts a term (a literal or `(`).
//!
//! Open groups are kept on an explicit stack rather than the call stack, so
//! nesting depth is limited only by memory.

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, PositionedToken, Token};
use crate::postfix::PostfixToken;

/// Progress through one parenthesized group, or the top level of the pattern
#[derive(Debug, Default)]
struct Group {
    /// Position of the `(`; `None` for the top level
    open: Option<usize>,
    /// Alternatives finished so far in this group
    branches: usize,
    /// Terms seen so far in the current alternative
    terms: usize,
    /// The current term still owes a `Concat` once its closures are emitted
    pending_concat: bool,
}

/// Parser for regex patterns
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: PositionedToken,
    output: Vec<PostfixToken>,
    groups: Vec<Group>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input string
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Parser {
            lexer,
            current,
            output: Vec::new(),
            groups: vec![Group::default()],
        }
    }

    /// Advance to the next token
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.current.position, kind)
    }

    fn emit(&mut self, token: PostfixToken) {
        self.output.push(token);
    }

    /// The innermost open group
    fn group(&mut self) -> &mut Group {
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    /// Parse the entire input and return the postfix sequence
    pub fn parse(mut self) -> Result<Vec<PostfixToken>, ParseError> {
        loop {
            match self.current.token {
                Token::Literal(c) => {
                    self.begin_term();
                    self.emit(PostfixToken::Literal(c));
                }
                Token::LeftParen => {
                    self.begin_term();
                    self.groups.push(Group {
                        open: Some(self.current.position),
                        ..Group::default()
                    });
                }
                Token::Star => self.closure('*', PostfixToken::Star)?,
                Token::Plus => self.closure('+', PostfixToken::Plus)?,
                Token::Pipe => {
                    self.check_operand(ParseErrorKind::DanglingOperator('|'))?;
                    self.end_branch();
                    let group = self.group();
                    group.branches += 1;
                    group.terms = 0;
                }
                Token::RightParen => self.close_group()?,
                Token::Eof => return self.finish(),
            }
            self.advance();
        }
    }

    /// Start a literal or group term in the current alternative
    fn begin_term(&mut self) {
        self.flush_concat();
        let group = self.group();
        group.pending_concat = group.terms > 0;
        group.terms += 1;
    }

    /// Emit a `*` or `+` for the term just finished
    fn closure(&mut self, op: char, token: PostfixToken) -> Result<(), ParseError> {
        if self.group().terms == 0 {
            return Err(self.error(ParseErrorKind::DanglingOperator(op)));
        }
        self.emit(token);
        Ok(())
    }

    /// Fail if the current alternative has no terms
    ///
    /// After a `|` that is a missing right operand; otherwise `kind`.
    fn check_operand(&mut self, kind: ParseErrorKind) -> Result<(), ParseError> {
        let group = self.group();
        match (group.terms, group.branches) {
            (0, 0) => Err(self.error(kind)),
            (0, _) => Err(self.error(ParseErrorKind::MissingOperand('|'))),
            _ => Ok(()),
        }
    }

    fn flush_concat(&mut self) {
        if std::mem::take(&mut self.group().pending_concat) {
            self.emit(PostfixToken::Concat);
        }
    }

    /// Finish the current alternative, joining it to the previous one
    fn end_branch(&mut self) {
        self.flush_concat();
        if self.group().branches > 0 {
            self.emit(PostfixToken::Alternate);
        }
    }

    fn close_group(&mut self) -> Result<(), ParseError> {
        let kind = if self.group().open.is_some() {
            ParseErrorKind::EmptyGroup
        } else {
            ParseErrorKind::UnmatchedCloseParen
        };
        self.check_operand(kind)?;
        if self.group().open.is_none() {
            return Err(self.error(ParseErrorKind::UnmatchedCloseParen));
        }

        self.end_branch();
        self.groups.pop();
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<PostfixToken>, ParseError> {
        let group = self.group();
        match (group.open, group.terms, group.branches) {
            (_, 0, branches) if branches > 0 => {
                Err(self.error(ParseErrorKind::MissingOperand('|')))
            }
            (Some(open), _, _) => Err(ParseError::new(open, ParseErrorKind::UnclosedGroup)),
            // An empty pattern is valid and yields no tokens
            (None, 0, _) => Ok(self.output),
            (None, _, _) => {
                self.end_branch();
                Ok(self.output)
            }
        }
    }
}

/// Parse a regex pattern string into its postfix sequence
pub fn parse(input: &str) -> Result<Vec<PostfixToken>, ParseError> {
    Parser::new(input).parse()
}
