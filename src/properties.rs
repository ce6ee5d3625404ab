use std::collections::BTreeSet;

use proptest::{collection, prelude::*, sample::select};

use crate::automaton::{FiniteAutomaton, State, Transition};

const SYMBOLS: [&str; 2] = ["a", "b"];

fn name(n: usize) -> State {
    format!("q{}", n)
}

fn build(n: usize, edges: Vec<(usize, Option<&str>, usize)>, finals: Vec<bool>) -> FiniteAutomaton {
    let transitions = edges.into_iter().map(|(from, symbol, to)| match symbol {
        Some(symbol) => Transition::new(name(from), symbol, name(to)),
        None => Transition::epsilon(name(from), name(to)),
    });
    let finals = finals
        .into_iter()
        .enumerate()
        .filter(|&(_, fin)| fin)
        .map(|(n, _)| name(n));
    FiniteAutomaton::new((0..n).map(name), SYMBOLS, transitions, name(0), finals).unwrap()
}

/// Arbitrary automata with up to `max_states` states, ε-moves included.
fn automaton(max_states: usize) -> impl Strategy<Value = FiniteAutomaton> {
    (1..=max_states).prop_flat_map(|n| {
        let edge = (
            0..n,
            prop::option::weighted(0.8, select(SYMBOLS.to_vec())),
            0..n,
        );
        (
            Just(n),
            collection::vec(edge, 0..3 * n),
            collection::vec(any::<bool>(), n),
        )
            .prop_map(|(n, edges, finals)| build(n, edges, finals))
    })
}

/// Automata with at most one move per (state, symbol) and no ε-moves.
fn deterministic(max_states: usize) -> impl Strategy<Value = FiniteAutomaton> {
    (1..=max_states).prop_flat_map(|n| {
        (
            Just(n),
            collection::vec(prop::option::of(0..n), n * SYMBOLS.len()),
            collection::vec(any::<bool>(), n),
        )
            .prop_map(|(n, table, finals)| {
                let edges = table
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, to)| {
                        to.map(|to| (i / SYMBOLS.len(), Some(SYMBOLS[i % SYMBOLS.len()]), to))
                    })
                    .collect();
                build(n, edges, finals)
            })
    })
}

fn word(max_len: usize) -> impl Strategy<Value = Vec<&'static str>> {
    collection::vec(select(SYMBOLS.to_vec()), 0..=max_len)
}

/// States reachable from the start through any moves.
fn reachable(fa: &FiniteAutomaton) -> BTreeSet<State> {
    let mut seen = BTreeSet::new();
    let mut todo = vec![fa.start_state().clone()];
    while let Some(state) = todo.pop() {
        if seen.insert(state.clone()) {
            todo.extend(
                fa.transitions()
                    .iter()
                    .filter(|t| t.source == state)
                    .map(|t| t.target.clone()),
            );
        }
    }
    seen
}

proptest! {
    #[test]
    fn subset_construction_is_deterministic(fa in automaton(6)) {
        let dfa = fa.to_deterministic_finite_automaton();
        prop_assert!(dfa.is_deterministic());
        prop_assert!(dfa.transitions().iter().all(|t| !t.is_epsilon()));
        prop_assert!(dfa.states().len() <= 1 << fa.states().len());
        prop_assert!(dfa.states().iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn dfa_finals_are_the_accepting_composites(fa in automaton(6)) {
        let dfa = fa.to_deterministic_finite_automaton();
        for state in dfa.states() {
            let accepting = state.iter().any(|s| fa.is_final(s));
            prop_assert_eq!(dfa.is_final(state), accepting);
        }
    }

    #[test]
    fn epsilon_closure_is_a_closure(
        fa in automaton(6),
        picks in collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let states: Vec<&State> = fa.states().iter().collect();
        let seed: BTreeSet<&State> = picks.iter().map(|i| *i.get(&states)).collect();

        let once = fa.epsilon_closure(seed.iter().cloned());
        let twice = fa.epsilon_closure(once.iter());
        prop_assert!(seed.iter().all(|s| once.contains(s)));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn determinism_check_counts_targets(fa in automaton(5)) {
        let expected = fa.states().iter().all(|state| {
            SYMBOLS.iter().all(|&symbol| {
                let targets: BTreeSet<&State> = fa
                    .transitions()
                    .iter()
                    .filter(|t| t.source == *state && t.symbol.as_deref() == Some(symbol))
                    .map(|t| &t.target)
                    .collect();
                targets.len() <= 1
            })
        });
        prop_assert_eq!(fa.is_deterministic(), expected);
    }

    #[test]
    fn deterministic_input_is_reproduced(fa in deterministic(6)) {
        prop_assert!(fa.is_deterministic());
        let dfa = fa.to_deterministic_finite_automaton();
        prop_assert!(dfa.states().iter().all(|c| c.single().is_some()));

        let renamed = dfa.map_states(|c| c.single().cloned().unwrap_or_default());
        let live = reachable(&fa);
        prop_assert_eq!(renamed.states(), &live);
        let kept: BTreeSet<Transition> = fa
            .transitions()
            .iter()
            .filter(|t| live.contains(&t.source))
            .cloned()
            .collect();
        prop_assert_eq!(renamed.transitions(), &kept);
    }

    #[test]
    fn dfa_accepts_the_same_words(fa in automaton(5), w in word(8)) {
        let dfa = fa.to_deterministic_finite_automaton();
        prop_assert_eq!(fa.accepts(&w), dfa.accepts(&w));
    }
}
