//! Regex matching engine
//!
//! This module simulates a compiled NFA by stepping a set of current states
//! through the input, closing the set under epsilon transitions after every
//! step. A pattern matches when the accepting state is in the final set.

use crate::error::Result;
use crate::nfa::{Nfa, StateId, Transition};
use crate::parser::parse;
use crate::postfix::PostfixToken;
use log::trace;
use std::collections::BTreeSet;

/// A set of NFA states, ordered for stable display
pub type StateSet = BTreeSet<StateId>;

/// NFA simulator for whole-string acceptance
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    nfa: &'a Nfa,
}

impl<'a> Simulator<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        Simulator { nfa }
    }

    /// The epsilon closure of the start state
    pub fn initial(&self) -> StateSet {
        let start: StateSet = [self.nfa.start()].into_iter().collect();
        self.nfa.epsilon_closure(&start)
    }

    /// Consume one character from every state in `states`, then close the
    /// result under epsilon transitions
    ///
    /// An empty set stays empty.
    pub fn step(&self, states: &StateSet, c: char) -> StateSet {
        let moved: StateSet = states
            .iter()
            .flat_map(|&state| self.nfa.transitions(state))
            .filter(|(transition, _)| *transition == Transition::Char(c))
            .map(|(_, target)| *target)
            .collect();

        if moved.is_empty() {
            return moved;
        }
        self.nfa.epsilon_closure(&moved)
    }

    /// The state set before any input, followed by the set after each
    /// character of `input`
    ///
    /// Processing always runs to the end of the input, even after the set
    /// becomes empty.
    pub fn trace(&self, input: &str) -> Vec<StateSet> {
        let mut sets = Vec::with_capacity(input.chars().count() + 1);
        let mut current = self.initial();

        for c in input.chars() {
            let next = self.step(&current, c);
            sets.push(current);
            current = next;
        }
        sets.push(current);
        sets
    }

    /// Check if the automaton accepts the whole of `input`
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.initial();

        for (pos, c) in input.chars().enumerate() {
            current = self.step(&current, c);
            trace!("after {:?} at {}: {} live states", c, pos, current.len());
        }

        current.contains(&self.nfa.accept())
    }
}

/// A compiled pattern
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    postfix: Vec<PostfixToken>,
    nfa: Nfa,
}

impl Regex {
    /// Compile a regex pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let postfix = parse(pattern)?;
        let nfa = Nfa::from_postfix(&postfix)?;
        Ok(Regex {
            pattern: pattern.to_string(),
            postfix,
            nfa,
        })
    }

    /// Check if the pattern matches the entire input
    pub fn is_match(&self, input: &str) -> bool {
        Simulator::new(&self.nfa).accepts(input)
    }

    /// The state sets visited while matching `input`
    pub fn trace(&self, input: &str) -> Vec<StateSet> {
        Simulator::new(&self.nfa).trace(input)
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The postfix sequence the pattern compiled to
    pub fn postfix(&self) -> &[PostfixToken] {
        &self.postfix
    }

    /// The compiled automaton
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// Take the compiled automaton out of the regex
    pub fn into_nfa(self) -> Nfa {
        self.nfa
    }
}
