//! Diagnostic output for compiled patterns
//!
//! Everything here is built on the read-only queries of [`Nfa`]; nothing in
//! the matching path depends on it.

use crate::engine::Regex;
use crate::error::Result;
use crate::nfa::{Nfa, Transition};
use crate::postfix::render;
use std::fmt;

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Char(c) => write!(f, "{}", c),
            Transition::Epsilon => write!(f, "ε"),
        }
    }
}

/// Renders the transition table, one edge per line
impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "states: {}", self.state_count())?;
        for (from, transition, to) in self.edges() {
            writeln!(f, "q{} --{}--> q{}", from, transition, to)?;
        }
        writeln!(f, "start: q{}", self.start())?;
        write!(f, "accept: q{}", self.accept())
    }
}

/// Compile with the intermediate forms kept for display
pub fn compile_debug(pattern: &str) -> Result<CompileReport> {
    let regex = Regex::new(pattern)?;

    Ok(CompileReport {
        pattern: pattern.to_string(),
        postfix: render(regex.postfix()),
        nfa: regex.into_nfa(),
    })
}

/// Result of a compilation with debug information
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// The original pattern
    pub pattern: String,
    /// The postfix form, with concatenation shown as `·`
    pub postfix: String,
    /// The compiled automaton
    pub nfa: Nfa,
}

impl CompileReport {
    /// Print a formatted report of the compilation
    pub fn report(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for CompileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compilation Report")?;
        writeln!(f, "==================")?;
        writeln!(f, "Pattern: {}", self.pattern)?;
        writeln!(f, "Postfix: {}", self.postfix)?;
        writeln!(f)?;
        write!(f, "{}", self.nfa)
    }
}
