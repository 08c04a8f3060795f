//! Regular expression to finite automaton compiler.
//!
//! Compiles a minimal regular expression syntax (alphanumeric symbols,
//! union `|`, Kleene star `*`, grouping parentheses, whitespace ignored
//! between tokens) into a nondeterministic finite automaton via
//! Thompson's construction, and optionally determinizes it with the
//! subset construction. Both automata can be simulated against candidate
//! strings.
//!
//! The pipeline is strictly linear; each stage consumes an immutable
//! predecessor and produces a fresh value:
//!
//! ```text
//! string → tokens → syntax tree → NFA → (optionally) DFA → accept/reject
//! ```
//!
//! ```
//! use regex_automaton_compiler::compile;
//!
//! let automaton = compile("(a|b)*c", false).unwrap();
//! assert!(automaton.simulate("abbac"));
//! assert!(!automaton.simulate("abba"));
//! ```

use std::collections::BTreeSet;

use log::{debug, trace};
use thiserror::Error;

pub mod ast;
pub mod compiler;
pub mod dfa;
pub mod lexer;
pub mod nfa;
pub mod parser;
pub mod token;

pub use ast::Ast;
pub use compiler::{build_nfa, Compiler};
pub use dfa::{to_dfa, Dfa, SubsetConstructor};
pub use lexer::{tokenize, Lexer};
pub use nfa::{AutomatonStats, Nfa, StateId};
pub use parser::{parse, Parser};
pub use token::{Token, TokenKind};

/// The result of running the full compilation pipeline.
pub type CompileResult<T> = Result<T, CompileError>;

/// An illegal character encountered during tokenization.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("illegal character '{character}' at position {position}")]
pub struct LexicalError {
    pub character: char,
    pub position: usize,
}

/// A grammar violation encountered while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

/// Errors surfaced by [`compile`], wrapping the originating phase
/// failure. Internal invariant violations are reported rather than
/// miscompiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("lexical analysis failed: {0}")]
    Lex(#[from] LexicalError),
    #[error("syntax analysis failed: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("internal error: {0}")]
    Internal(String),
}

/// A compiled automaton, nondeterministic or determinized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Automaton {
    Nfa(Nfa),
    Dfa(Dfa),
}

impl Automaton {
    /// Runs the automaton against a candidate string.
    pub fn simulate(&self, input: &str) -> bool {
        match self {
            Automaton::Nfa(nfa) => nfa.simulate(input),
            Automaton::Dfa(dfa) => dfa.simulate(input),
        }
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        match self {
            Automaton::Nfa(nfa) => nfa.alphabet(),
            Automaton::Dfa(dfa) => dfa.alphabet(),
        }
    }

    pub fn state_count(&self) -> usize {
        match self {
            Automaton::Nfa(nfa) => nfa.state_count(),
            Automaton::Dfa(dfa) => dfa.state_count(),
        }
    }

    pub fn stats(&self) -> AutomatonStats {
        match self {
            Automaton::Nfa(nfa) => nfa.stats(),
            Automaton::Dfa(dfa) => dfa.stats(),
        }
    }

    pub fn to_dot(&self) -> String {
        match self {
            Automaton::Nfa(nfa) => nfa.to_dot(),
            Automaton::Dfa(dfa) => dfa.to_dot(),
        }
    }
}

/// Compiles `pattern` through the full pipeline: tokenize, parse,
/// Thompson construction, and, when `determinize` is set, the subset
/// construction. The first failing phase aborts compilation.
pub fn compile(pattern: &str, determinize: bool) -> CompileResult<Automaton> {
    debug!("compiling pattern {:?}", pattern);

    let tokens = lexer::tokenize(pattern)?;
    trace!("tokens: {:?}", tokens);

    let ast = parser::parse(tokens)?;
    trace!("syntax tree:\n{}", ast.render_tree());

    let nfa = compiler::build_nfa(&ast);
    debug!(
        "thompson construction: {} states, {} transitions",
        nfa.state_count(),
        nfa.transition_count()
    );
    trace!("{}", nfa);

    if determinize {
        let dfa = dfa::to_dfa(&nfa);
        debug!(
            "subset construction: {} states, {} transitions",
            dfa.state_count(),
            dfa.transition_count()
        );
        trace!("{}", dfa);
        Ok(Automaton::Dfa(dfa))
    } else {
        Ok(Automaton::Nfa(nfa))
    }
}

/// Compiles `pattern` and tests `input` against it in one step.
pub fn test_string(pattern: &str, input: &str, use_dfa: bool) -> CompileResult<bool> {
    Ok(compile(pattern, use_dfa)?.simulate(input))
}
