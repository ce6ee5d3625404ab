use std::collections::BTreeMap;
use std::fmt;

use crate::automaton::{FiniteAutomaton, State};

/// Target state name that never yields a production.
pub const DEAD_STATE: &str = "X";

/// Right-linear grammar read off an automaton: each state maps to the
/// productions `symbol target` of its outgoing moves.
///
/// Moves into accepting states get no terminating production of their own,
/// and ε-moves produce `ε` followed by the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegularGrammar<S = State> {
    productions: BTreeMap<S, Vec<String>>,
}

impl<S: Ord> RegularGrammar<S> {
    /// Productions of `state`, empty for states without any.
    pub fn productions(&self, state: &S) -> &[String] {
        self.productions
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &[String])> {
        self.productions
            .iter()
            .map(|(state, productions)| (state, productions.as_slice()))
    }

    /// Number of non-terminals, one per state.
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}

impl<S: fmt::Display> fmt::Display for RegularGrammar<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (state, productions) in &self.productions {
            for production in productions {
                writeln!(f, "{} -> {}", state, production)?;
            }
        }
        Ok(())
    }
}

impl<S: Ord + Clone + fmt::Display> FiniteAutomaton<S> {
    /// Projects the transition relation onto a regular grammar. Every state
    /// gets an entry; moves into a state named `X` are left out.
    pub fn to_regular_grammar(&self) -> RegularGrammar<S> {
        let mut productions: BTreeMap<S, Vec<String>> = self
            .states()
            .iter()
            .map(|state| (state.clone(), Vec::new()))
            .collect();

        for transition in self.transitions() {
            let target = transition.target.to_string();
            if target == DEAD_STATE {
                continue;
            }
            if let Some(rhs) = productions.get_mut(&transition.source) {
                rhs.push(format!("{}{}", transition.label(), target));
            }
        }

        RegularGrammar { productions }
    }
}
