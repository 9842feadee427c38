//! NFA (Nondeterministic Finite Automaton) model and Thompson composition
//!
//! Every `Nfa` is also a fragment: it owns its states, numbered from 0, and
//! has exactly one start state and one accepting state. Composing fragments
//! appends one fragment's states after another's and shifts every index the
//! appended fragment uses by the same offset, so sub-automata never collide.

use std::collections::BTreeSet;

/// An NFA state ID, unique within its automaton
pub type StateId = usize;

/// A transition label in the NFA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Transition on a specific character
    Char(char),
    /// Epsilon transition (no input consumed)
    Epsilon,
}

impl Transition {
    /// Check if this is an epsilon transition
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Transition::Epsilon)
    }
}

/// An NFA state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    /// Transitions from this state
    transitions: Vec<(Transition, StateId)>,
}

impl State {
    fn new() -> Self {
        State {
            transitions: Vec::new(),
        }
    }

    /// Outgoing transitions, in insertion order
    pub fn transitions(&self) -> &[(Transition, StateId)] {
        &self.transitions
    }

    /// Shift every transition target by `offset`
    fn shifted(mut self, offset: StateId) -> Self {
        for (_, target) in &mut self.transitions {
            *target += offset;
        }
        self
    }
}

/// An NFA (Nondeterministic Finite Automaton)
#[derive(Debug, Clone, PartialEq)]
pub struct Nfa {
    /// All states in the NFA
    states: Vec<State>,
    /// The start state
    start: StateId,
    /// The accepting state
    accept: StateId,
}

impl Nfa {
    /// An NFA with no states, for the fragment constructors to fill in
    fn new() -> Self {
        Nfa {
            states: Vec::new(),
            start: 0,
            accept: 0,
        }
    }

    /// Allocate a new state and return its ID
    pub fn new_state(&mut self) -> StateId {
        self.states.push(State::new());
        self.states.len() - 1
    }

    /// Add a transition between states
    ///
    /// # Panics
    /// Panics if `from` is not a state of this automaton.
    pub fn add_transition(&mut self, from: StateId, transition: Transition, to: StateId) {
        self.states[from].transitions.push((transition, to));
    }

    /// Append all of `other`'s states after this automaton's own, shifting
    /// their indices, and return the offset that was applied.
    ///
    /// Start and accept of `self` are left alone; the caller wires the
    /// absorbed fragment in using `other.start() + offset` and
    /// `other.accept() + offset`.
    pub fn absorb(&mut self, other: Nfa) -> StateId {
        let offset = self.states.len();
        self.states
            .extend(other.states.into_iter().map(|state| state.shifted(offset)));
        offset
    }

    /// An independent deep copy of this fragment
    ///
    /// The copy owns its own states, so once it is merged into a larger
    /// automaton its states get fresh indices distinct from the original's.
    pub fn duplicate(&self) -> Nfa {
        self.clone()
    }

    /// The fragment that accepts only the empty string
    pub fn empty() -> Self {
        let mut nfa = Nfa::new();
        let start = nfa.new_state();
        let accept = nfa.new_state();
        nfa.add_transition(start, Transition::Epsilon, accept);
        nfa.start = start;
        nfa.accept = accept;
        nfa
    }

    /// The fragment that accepts exactly the one-character string `c`
    pub fn literal(c: char) -> Self {
        let mut nfa = Nfa::new();
        let start = nfa.new_state();
        let accept = nfa.new_state();
        nfa.add_transition(start, Transition::Char(c), accept);
        nfa.start = start;
        nfa.accept = accept;
        nfa
    }

    /// `left` followed by `right`
    ///
    /// `left` keeps its indices; `right` is shifted past it and joined by an
    /// epsilon edge from `left`'s accept to `right`'s start.
    pub fn concat(left: Nfa, right: Nfa) -> Nfa {
        let (right_start, right_accept) = (right.start, right.accept);
        let mut nfa = left;
        let offset = nfa.absorb(right);

        nfa.add_transition(nfa.accept, Transition::Epsilon, right_start + offset);
        nfa.accept = right_accept + offset;
        nfa
    }

    /// Either `left` or `right`
    pub fn alternate(left: Nfa, right: Nfa) -> Nfa {
        let (left_start, left_accept) = (left.start, left.accept);
        let (right_start, right_accept) = (right.start, right.accept);

        let mut nfa = Nfa::new();
        let start = nfa.new_state();
        let left_offset = nfa.absorb(left);
        let right_offset = nfa.absorb(right);
        let accept = nfa.new_state();

        nfa.add_transition(start, Transition::Epsilon, left_start + left_offset);
        nfa.add_transition(start, Transition::Epsilon, right_start + right_offset);
        nfa.add_transition(left_accept + left_offset, Transition::Epsilon, accept);
        nfa.add_transition(right_accept + right_offset, Transition::Epsilon, accept);

        nfa.start = start;
        nfa.accept = accept;
        nfa
    }

    /// Zero or more repetitions of `inner`
    pub fn star(inner: Nfa) -> Nfa {
        let (inner_start, inner_accept) = (inner.start, inner.accept);

        let mut nfa = Nfa::new();
        let start = nfa.new_state();
        let offset = nfa.absorb(inner);
        let accept = nfa.new_state();

        let (inner_start, inner_accept) = (inner_start + offset, inner_accept + offset);
        nfa.add_transition(start, Transition::Epsilon, inner_start);
        nfa.add_transition(start, Transition::Epsilon, accept);
        nfa.add_transition(inner_accept, Transition::Epsilon, inner_start);
        nfa.add_transition(inner_accept, Transition::Epsilon, accept);

        nfa.start = start;
        nfa.accept = accept;
        nfa
    }

    /// One or more repetitions of `inner`: one mandatory copy followed by
    /// the star of an independent duplicate
    pub fn plus(inner: Nfa) -> Nfa {
        let repeated = Nfa::star(inner.duplicate());
        Nfa::concat(inner, repeated)
    }

    /// The start state
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The accepting state
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// Total number of states
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of transitions across all states
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// All states, indexed by `StateId`
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Outgoing transitions of `state`
    ///
    /// A `state` outside this automaton has none.
    pub fn transitions(&self, state: StateId) -> &[(Transition, StateId)] {
        match self.states.get(state) {
            Some(s) => &s.transitions,
            None => &[],
        }
    }

    /// Every transition as `(from, label, to)`, ordered by source state
    pub fn edges(&self) -> impl Iterator<Item = (StateId, &Transition, StateId)> + '_ {
        self.states.iter().enumerate().flat_map(|(from, state)| {
            state
                .transitions
                .iter()
                .map(move |(transition, to)| (from, transition, *to))
        })
    }

    /// Compute epsilon closure of a set of states
    ///
    /// Uses an explicit worklist, so epsilon cycles terminate.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<_> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for (transition, target) in self.transitions(state) {
                if transition.is_epsilon() && closure.insert(*target) {
                    stack.push(*target);
                }
            }
        }

        closure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epsilon_edges(nfa: &Nfa) -> usize {
        nfa.edges().filter(|(_, t, _)| t.is_epsilon()).count()
    }

    #[test]
    fn test_nfa_from_literal() {
        let nfa = Nfa::literal('a');
        assert_eq!(nfa.state_count(), 2);
        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.accept(), 1);
        assert_eq!(nfa.transitions(0), &[(Transition::Char('a'), 1)]);
        assert!(nfa.transitions(1).is_empty());
    }

    #[test]
    fn test_nfa_empty() {
        let nfa = Nfa::empty();
        assert_eq!(nfa.state_count(), 2);
        assert_eq!(nfa.transitions(0), &[(Transition::Epsilon, 1)]);
    }

    #[test]
    fn test_concat_shifts_right_operand() {
        let nfa = Nfa::concat(Nfa::literal('a'), Nfa::literal('b'));
        assert_eq!(nfa.state_count(), 4);
        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.accept(), 3);
        let edges: Vec<_> = nfa.edges().map(|(f, t, to)| (f, *t, to)).collect();
        assert_eq!(
            edges,
            vec![
                (0, Transition::Char('a'), 1),
                (1, Transition::Epsilon, 2),
                (2, Transition::Char('b'), 3),
            ]
        );
    }

    #[test]
    fn test_alternate_layout() {
        let nfa = Nfa::alternate(Nfa::literal('a'), Nfa::literal('b'));
        assert_eq!(nfa.state_count(), 6);
        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.accept(), 5);
        assert_eq!(
            nfa.transitions(0),
            &[(Transition::Epsilon, 1), (Transition::Epsilon, 3)]
        );
        assert_eq!(nfa.transitions(2), &[(Transition::Epsilon, 5)]);
        assert_eq!(nfa.transitions(4), &[(Transition::Epsilon, 5)]);
        assert!(nfa.transitions(5).is_empty());
    }

    #[test]
    fn test_star_layout() {
        let nfa = Nfa::star(Nfa::literal('a'));
        assert_eq!(nfa.state_count(), 4);
        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.accept(), 3);
        assert_eq!(
            nfa.transitions(0),
            &[(Transition::Epsilon, 1), (Transition::Epsilon, 3)]
        );
        assert_eq!(
            nfa.transitions(2),
            &[(Transition::Epsilon, 1), (Transition::Epsilon, 3)]
        );
        assert_eq!(epsilon_edges(&nfa), 4);
    }

    #[test]
    fn test_plus_uses_independent_copy() {
        let nfa = Nfa::plus(Nfa::literal('a'));
        // 2 for the mandatory copy, 4 for the starred duplicate
        assert_eq!(nfa.state_count(), 6);
        let a_edges: Vec<_> = nfa
            .edges()
            .filter(|(_, t, _)| **t == Transition::Char('a'))
            .map(|(from, _, to)| (from, to))
            .collect();
        assert_eq!(a_edges, vec![(0, 1), (3, 4)]);
    }

    #[test]
    fn test_duplicate_is_deep() {
        let original = Nfa::literal('x');
        let mut copy = original.duplicate();
        let extra = copy.new_state();
        copy.add_transition(copy.accept(), Transition::Epsilon, extra);
        assert_eq!(original.state_count(), 2);
        assert_eq!(copy.state_count(), 3);
        assert!(original.transitions(1).is_empty());
    }

    #[test]
    fn test_absorb_returns_offset() {
        let mut nfa = Nfa::literal('a');
        let offset = nfa.absorb(Nfa::literal('b'));
        assert_eq!(offset, 2);
        assert_eq!(nfa.transitions(2), &[(Transition::Char('b'), 3)]);
        // Absorbing does not rewire start or accept
        assert_eq!(nfa.accept(), 1);
    }

    #[test]
    fn test_epsilon_closure() {
        let mut nfa = Nfa::new();
        let s0 = nfa.new_state();
        let s1 = nfa.new_state();
        let s2 = nfa.new_state();
        let s3 = nfa.new_state();

        nfa.add_transition(s0, Transition::Epsilon, s1);
        nfa.add_transition(s1, Transition::Epsilon, s2);
        nfa.add_transition(s2, Transition::Char('a'), s3);

        let closure = nfa.epsilon_closure(&[s0].into_iter().collect());
        assert_eq!(closure, [s0, s1, s2].into_iter().collect());
    }

    #[test]
    fn test_epsilon_closure_terminates_on_cycle() {
        let mut nfa = Nfa::new();
        let s0 = nfa.new_state();
        let s1 = nfa.new_state();
        nfa.add_transition(s0, Transition::Epsilon, s1);
        nfa.add_transition(s1, Transition::Epsilon, s0);
        nfa.add_transition(s1, Transition::Epsilon, s1);

        let closure = nfa.epsilon_closure(&[s1].into_iter().collect());
        assert_eq!(closure, [s0, s1].into_iter().collect());
    }

    #[test]
    fn test_dangling_target_has_no_transitions() {
        let mut nfa = Nfa::literal('a');
        nfa.add_transition(nfa.accept(), Transition::Epsilon, 99);
        assert!(nfa.transitions(99).is_empty());

        let closure = nfa.epsilon_closure(&[nfa.accept()].into_iter().collect());
        assert_eq!(closure, [1, 99].into_iter().collect());
    }

    #[test]
    fn test_complex_counts() {
        // (a|b)*c
        let nfa = Nfa::concat(
            Nfa::star(Nfa::alternate(Nfa::literal('a'), Nfa::literal('b'))),
            Nfa::literal('c'),
        );
        assert_eq!(nfa.state_count(), 10);
        assert_eq!(nfa.transition_count(), 12);
        assert_eq!(nfa.start(), 0);
        assert_eq!(nfa.accept(), 9);
    }
}
