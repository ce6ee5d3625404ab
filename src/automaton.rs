use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use crate::error::MalformedAutomatonError;

/// A state label.
pub type State = String;
/// A member of the alphabet.
pub type Symbol = String;

/// How ε is written when a transition is read from, or rendered as, text.
pub const EPSILON: &str = "ε";

/// A single move of the transition relation. `symbol` is `None` for an ε-move.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Transition<S = State> {
    pub source: S,
    pub symbol: Option<Symbol>,
    pub target: S,
}

impl<S> Transition<S> {
    /// Reads the literal symbol `"ε"` as an ε-move.
    pub fn new(source: impl Into<S>, symbol: impl Into<Symbol>, target: impl Into<S>) -> Self {
        let symbol = symbol.into();
        Transition {
            source: source.into(),
            symbol: if symbol == EPSILON { None } else { Some(symbol) },
            target: target.into(),
        }
    }

    pub fn epsilon(source: impl Into<S>, target: impl Into<S>) -> Self {
        Transition {
            source: source.into(),
            symbol: None,
            target: target.into(),
        }
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_none()
    }

    /// The label as written, `ε` for ε-moves.
    pub fn label(&self) -> &str {
        self.symbol.as_deref().unwrap_or(EPSILON)
    }
}

impl<S: fmt::Display> fmt::Display for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {} --> {}", self.source, self.label(), self.target)
    }
}

/// A finite automaton (Q, Sigma, Delta, q0, F).
///
/// Every transition's endpoints lie in Q, every non-ε label lies in Sigma, and
/// ε itself is never part of Sigma. The value is immutable once built; the
/// conversions in this crate all produce new automata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiniteAutomaton<S = State> {
    states: BTreeSet<S>,
    alphabet: BTreeSet<Symbol>,
    transitions: BTreeSet<Transition<S>>,
    start: S,
    finals: BTreeSet<S>,
}

impl<S: Ord + Clone + fmt::Display> FiniteAutomaton<S> {
    /// Builds an automaton from its literal description, rejecting anything
    /// that breaks the invariants above.
    pub fn new<Q, A, D, F>(
        states: Q,
        alphabet: A,
        transitions: D,
        start: impl Into<S>,
        finals: F,
    ) -> Result<Self, MalformedAutomatonError>
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
        A: IntoIterator,
        A::Item: Into<Symbol>,
        D: IntoIterator<Item = Transition<S>>,
        F: IntoIterator,
        F::Item: Into<S>,
    {
        let automaton = Self::from_parts(
            states.into_iter().map(Into::into).collect(),
            alphabet.into_iter().map(Into::into).collect(),
            transitions.into_iter().collect(),
            start.into(),
            finals.into_iter().map(Into::into).collect(),
        );
        automaton.validate()?;
        debug!(
            "Built automaton: {} states, {} symbols, {} transitions",
            automaton.states.len(),
            automaton.alphabet.len(),
            automaton.transitions.len()
        );
        Ok(automaton)
    }

    fn validate(&self) -> Result<(), MalformedAutomatonError> {
        if self.alphabet.contains(EPSILON) {
            return Err(MalformedAutomatonError::ReservedSymbol);
        }
        if !self.states.contains(&self.start) {
            return Err(MalformedAutomatonError::UnknownStartState(self.start.to_string()));
        }
        if let Some(state) = self.finals.iter().find(|&f| !self.states.contains(f)) {
            return Err(MalformedAutomatonError::UnknownFinalState(state.to_string()));
        }
        for transition in &self.transitions {
            for state in [&transition.source, &transition.target] {
                if !self.states.contains(state) {
                    return Err(MalformedAutomatonError::UnknownState {
                        transition: transition.to_string(),
                        state: state.to_string(),
                    });
                }
            }
            if let Some(ref symbol) = transition.symbol {
                if !self.alphabet.contains(symbol) {
                    return Err(MalformedAutomatonError::UnknownSymbol {
                        transition: transition.to_string(),
                        symbol: symbol.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<S: Ord + Clone> FiniteAutomaton<S> {
    /// Assembles an automaton the caller already knows to be well-formed.
    pub(crate) fn from_parts(
        states: BTreeSet<S>,
        alphabet: BTreeSet<Symbol>,
        transitions: BTreeSet<Transition<S>>,
        start: S,
        finals: BTreeSet<S>,
    ) -> Self {
        FiniteAutomaton {
            states,
            alphabet,
            transitions,
            start,
            finals,
        }
    }

    pub fn states(&self) -> &BTreeSet<S> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn transitions(&self) -> &BTreeSet<Transition<S>> {
        &self.transitions
    }

    pub fn start_state(&self) -> &S {
        &self.start
    }

    pub fn final_states(&self) -> &BTreeSet<S> {
        &self.finals
    }

    pub fn is_final(&self, state: &S) -> bool {
        self.finals.contains(state)
    }

    /// Distinct targets of the moves leaving `state` on `symbol` (`None` for ε).
    pub fn targets<'a, 'b>(
        &'a self,
        state: &'b S,
        symbol: Option<&'b str>,
    ) -> impl Iterator<Item = &'a S> + 'b
    where
        'a: 'b,
    {
        self.transitions
            .iter()
            .filter(move |t| t.source == *state && t.symbol.as_deref() == symbol)
            .map(|t| &t.target)
    }

    /// True when no (state, symbol) pair over Q × Sigma has two distinct targets.
    ///
    /// Missing moves are allowed. ε-moves are never looked at, since only the
    /// symbols of Sigma are iterated, so an automaton with ε-moves can still be
    /// reported deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.states.iter().all(|state| {
            self.alphabet.iter().all(|symbol| {
                self.targets(state, Some(symbol.as_str()))
                    .nth(1)
                    .is_none()
            })
        })
    }

    /// Renames every state through `f`. States that `f` maps to the same value
    /// are merged.
    pub fn map_states<T, F>(&self, mut f: F) -> FiniteAutomaton<T>
    where
        T: Ord + Clone,
        F: FnMut(&S) -> T,
    {
        FiniteAutomaton {
            states: self.states.iter().map(&mut f).collect(),
            alphabet: self.alphabet.clone(),
            transitions: self
                .transitions
                .iter()
                .map(|t| Transition {
                    source: f(&t.source),
                    symbol: t.symbol.clone(),
                    target: f(&t.target),
                })
                .collect(),
            start: f(&self.start),
            finals: self.finals.iter().map(&mut f).collect(),
        }
    }
}
