//! Thompson construction over a postfix sequence
//!
//! The builder keeps an operand stack of fragments. Literals push a new
//! fragment; operators pop their operands, compose them, and push the
//! result. A well-formed sequence leaves exactly one fragment behind.

use crate::error::ConstructionError;
use crate::nfa::Nfa;
use crate::postfix::PostfixToken;
use log::{debug, trace};

/// Operand stack for building an NFA from postfix tokens
#[derive(Debug, Default)]
pub struct Builder {
    stack: Vec<Nfa>,
}

impl Builder {
    /// Create a builder with an empty operand stack
    pub fn new() -> Self {
        Builder { stack: Vec::new() }
    }

    /// Number of fragments currently on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Apply one postfix token to the stack
    ///
    /// On error the stack is left as it was.
    pub fn push_token(&mut self, token: PostfixToken) -> Result<(), ConstructionError> {
        let fragment = match token {
            PostfixToken::Literal(c) => Nfa::literal(c),
            PostfixToken::Concat => {
                let [left, right] = self.pop_n(token)?;
                Nfa::concat(left, right)
            }
            PostfixToken::Alternate => {
                let [left, right] = self.pop_n(token)?;
                Nfa::alternate(left, right)
            }
            PostfixToken::Star => {
                let [inner] = self.pop_n(token)?;
                Nfa::star(inner)
            }
            PostfixToken::Plus => {
                let [inner] = self.pop_n(token)?;
                Nfa::plus(inner)
            }
        };

        trace!(
            "applied `{}`: fragment has {} states, stack depth {}",
            token,
            fragment.state_count(),
            self.stack.len() + 1
        );
        self.stack.push(fragment);
        Ok(())
    }

    /// Finish building and return the completed automaton
    ///
    /// An untouched builder yields the automaton for the empty pattern.
    pub fn finish(mut self) -> Result<Nfa, ConstructionError> {
        let depth = self.stack.len();
        match self.stack.pop() {
            None => Ok(Nfa::empty()),
            Some(nfa) if depth == 1 => Ok(nfa),
            Some(_) => Err(ConstructionError::UnbalancedStack(depth)),
        }
    }

    /// Pop the `N` most recent fragments, returned in the order they were pushed
    fn pop_n<const N: usize>(&mut self, op: PostfixToken) -> Result<[Nfa; N], ConstructionError> {
        debug_assert_eq!(N, op.arity());
        let depth = self.stack.len();
        let underflow = ConstructionError::StackUnderflow { op, depth };
        let split = depth.checked_sub(N).ok_or_else(|| underflow.clone())?;
        self.stack
            .split_off(split)
            .try_into()
            .map_err(|_| underflow)
    }
}

impl Nfa {
    /// Build an NFA from a postfix token sequence
    ///
    /// An empty sequence produces the automaton that accepts only the empty
    /// string.
    pub fn from_postfix(tokens: &[PostfixToken]) -> Result<Nfa, ConstructionError> {
        let mut builder = Builder::new();
        for &token in tokens {
            builder.push_token(token)?;
        }
        let nfa = builder.finish()?;

        debug!(
            "built NFA from {} postfix tokens: {} states, {} transitions",
            tokens.len(),
            nfa.state_count(),
            nfa.transition_count()
        );
        Ok(nfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Transition;
    use crate::postfix::PostfixToken::*;

    #[test]
    fn test_build_empty() {
        let nfa = Nfa::from_postfix(&[]).unwrap();
        assert_eq!(nfa, Nfa::empty());
    }

    #[test]
    fn test_build_literal() {
        let nfa = Nfa::from_postfix(&[Literal('c')]).unwrap();
        assert_eq!(nfa, Nfa::literal('c'));
    }

    #[test]
    fn test_build_concat_keeps_operand_order() {
        let nfa = Nfa::from_postfix(&[Literal('a'), Literal('b'), Concat]).unwrap();
        assert_eq!(nfa.transitions(nfa.start()), &[(Transition::Char('a'), 1)]);
        assert_eq!(nfa.transitions(2), &[(Transition::Char('b'), 3)]);
    }

    #[test]
    fn test_build_matches_direct_composition() {
        // (a|b)*c+
        let tokens = [
            Literal('a'),
            Literal('b'),
            Alternate,
            Star,
            Literal('c'),
            Plus,
            Concat,
        ];
        let expected = Nfa::concat(
            Nfa::star(Nfa::alternate(Nfa::literal('a'), Nfa::literal('b'))),
            Nfa::plus(Nfa::literal('c')),
        );
        assert_eq!(Nfa::from_postfix(&tokens).unwrap(), expected);
    }

    #[test]
    fn test_build_is_deterministic() {
        let tokens = [Literal('a'), Star, Literal('b'), Concat];
        assert_eq!(
            Nfa::from_postfix(&tokens).unwrap(),
            Nfa::from_postfix(&tokens).unwrap()
        );
    }

    #[test]
    fn test_underflow_on_binary_operator() {
        let err = Nfa::from_postfix(&[Literal('a'), Concat]).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::StackUnderflow {
                op: Concat,
                depth: 1
            }
        );
    }

    #[test]
    fn test_underflow_on_unary_operator() {
        let err = Nfa::from_postfix(&[Star]).unwrap_err();
        assert_eq!(err, ConstructionError::StackUnderflow { op: Star, depth: 0 });
    }

    #[test]
    fn test_unbalanced_stack() {
        let err = Nfa::from_postfix(&[Literal('a'), Literal('b')]).unwrap_err();
        assert_eq!(err, ConstructionError::UnbalancedStack(2));
    }

    #[test]
    fn test_builder_recovers_after_underflow() {
        let mut builder = Builder::new();
        builder.push_token(Literal('a')).unwrap();
        assert!(builder.push_token(Alternate).is_err());
        assert_eq!(builder.depth(), 1);

        builder.push_token(Literal('b')).unwrap();
        builder.push_token(Concat).unwrap();
        assert_eq!(
            builder.finish().unwrap(),
            Nfa::concat(Nfa::literal('a'), Nfa::literal('b'))
        );
    }

    #[test]
    fn test_builder_depth() {
        let mut builder = Builder::new();
        builder.push_token(Literal('a')).unwrap();
        builder.push_token(Literal('b')).unwrap();
        assert_eq!(builder.depth(), 2);
        builder.push_token(Alternate).unwrap();
        assert_eq!(builder.depth(), 1);
    }
}
