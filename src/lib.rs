//! Finite automata for teaching: determinism checks, projection onto regular
//! grammars, subset construction with ε-closure, and a small random string
//! generator for regular-expression-like patterns.

pub mod automaton;
pub mod dfa;
pub mod error;
pub mod grammar;
pub mod nfa;
pub mod pattern;

#[cfg(test)]
mod properties;

pub use automaton::{FiniteAutomaton, State, Symbol, Transition, EPSILON};
pub use dfa::{CompositeState, Dfa};
pub use error::{MalformedAutomatonError, MalformedPatternError, PatternErrorKind};
pub use grammar::{RegularGrammar, DEAD_STATE};
pub use pattern::{generate, generate_with, Pattern, RandomSource};
