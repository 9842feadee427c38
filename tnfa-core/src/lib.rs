//! tnfa Core Library
//!
//! Compiles regular expressions over literal characters, `*`, `+`, `|` and
//! grouping into Thompson NFAs, and simulates them to decide whether a
//! whole input string is accepted.
//!
//! ```
//! let nfa = tnfa_core::compile("(a|b)*c").unwrap();
//! assert!(tnfa_core::matches(&nfa, "ababc"));
//! assert!(!tnfa_core::matches(&nfa, "abab"));
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod nfa;
pub mod parser;
pub mod postfix;
pub mod report;

pub use builder::Builder;
pub use engine::{Regex, Simulator, StateSet};
pub use error::{ConstructionError, ParseError, ParseErrorKind, RegexError, Result};
pub use lexer::{Lexer, PositionedToken, Token};
pub use nfa::{Nfa, State, StateId, Transition};
pub use parser::{Parser, parse};
pub use postfix::PostfixToken;
pub use report::{CompileReport, compile_debug};

/// Compile a regex pattern into an NFA
///
/// This is the parser and builder run back to back.
pub fn compile(regex: &str) -> Result<Nfa> {
    Regex::new(regex).map(Regex::into_nfa)
}

/// Check whether `nfa` accepts the whole of `input`
pub fn matches(nfa: &Nfa, input: &str) -> bool {
    Simulator::new(nfa).accepts(input)
}
