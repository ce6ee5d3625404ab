use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;

use bit_set::BitSet;
use bit_vec::BitVec;
use log::{debug, trace};

use crate::automaton::{FiniteAutomaton, Transition};
use crate::dfa::{CompositeState, Dfa};

/// Numbers the states of an automaton so that sets of states can be handled
/// as bitsets while exploring it.
struct StateIndex<'a, S> {
    states: Vec<&'a S>,
    positions: BTreeMap<&'a S, usize>,
    // state -> states one ε-move away
    epsilon: Vec<BitSet>,
    // state -> (symbol -> targets)
    moves: Vec<HashMap<&'a str, BitSet>>,
    finals: BitVec,
}

impl<'a, S: Ord + Clone> StateIndex<'a, S> {
    fn new(automaton: &'a FiniteAutomaton<S>) -> Self {
        let states: Vec<&S> = automaton.states().iter().collect();
        let positions: BTreeMap<&S, usize> = states
            .iter()
            .enumerate()
            .map(|(n, &state)| (state, n))
            .collect();
        let len = states.len();

        let mut epsilon = vec![BitSet::with_capacity(len); len];
        let mut moves: Vec<HashMap<&str, BitSet>> = vec![HashMap::new(); len];
        for transition in automaton.transitions() {
            let from = positions[&transition.source];
            let to = positions[&transition.target];
            match transition.symbol {
                None => {
                    epsilon[from].insert(to);
                }
                Some(ref symbol) => {
                    moves[from]
                        .entry(symbol.as_str())
                        .or_insert_with(|| BitSet::with_capacity(len))
                        .insert(to);
                }
            }
        }

        let mut finals = BitVec::from_elem(len, false);
        for state in automaton.final_states() {
            finals.set(positions[state], true);
        }

        StateIndex {
            states,
            positions,
            epsilon,
            moves,
            finals,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    fn position(&self, state: &S) -> Option<usize> {
        self.positions.get(state).cloned()
    }

    fn singleton(&self, state: &S) -> BitSet {
        let mut set = BitSet::with_capacity(self.len());
        if let Some(n) = self.position(state) {
            set.insert(n);
        }
        set
    }

    /// Grows `set` along ε-moves until nothing new is reached.
    fn closure(&self, mut set: BitSet) -> BitSet {
        let mut stack: Vec<usize> = set.iter().collect();
        while let Some(state) = stack.pop() {
            for next in self.epsilon[state].iter() {
                if set.insert(next) {
                    stack.push(next);
                }
            }
        }
        set
    }

    /// Targets of all `symbol` moves out of `set`, without closing over ε.
    fn step(&self, set: &BitSet, symbol: &str) -> BitSet {
        let mut next = BitSet::with_capacity(self.len());
        for state in set.iter() {
            if let Some(targets) = self.moves[state].get(symbol) {
                next.union_with(targets);
            }
        }
        next
    }

    fn is_accepting(&self, set: &BitSet) -> bool {
        set.iter().any(|n| self.finals[n])
    }

    fn members(&self, set: &BitSet) -> BTreeSet<S> {
        set.iter().map(|n| self.states[n].clone()).collect()
    }

    fn composite(&self, set: &BitSet) -> CompositeState<S> {
        CompositeState::from(self.members(set))
    }
}

impl<S: Ord + Clone + fmt::Display> FiniteAutomaton<S> {
    /// The states reachable from `states` using only ε-moves, the given
    /// states included.
    ///
    /// A state that is not part of the automaton has no moves, so it ends up
    /// in the closure on its own.
    pub fn epsilon_closure<'s, I>(&self, states: I) -> CompositeState<S>
    where
        I: IntoIterator<Item = &'s S>,
        S: 's,
    {
        let index = StateIndex::new(self);
        let mut seed = BitSet::with_capacity(index.len());
        let mut outside = Vec::new();
        for state in states {
            match index.position(state) {
                Some(n) => {
                    seed.insert(n);
                }
                None => outside.push(state.clone()),
            }
        }

        let mut members = index.members(&index.closure(seed));
        members.extend(outside);
        CompositeState::from(members)
    }

    /// Subset construction.
    ///
    /// Every state of the result is the ε-closed set of source states the
    /// automaton can be in after reading some word. Composite states are
    /// explored first-come first-served, each one exactly once, so the
    /// construction ends after at most 2^|Q| states. A (state, symbol) pair
    /// that leads nowhere gets no transition; there is no explicit dead state.
    pub fn to_deterministic_finite_automaton(&self) -> Dfa<S> {
        let index = StateIndex::new(self);

        let start = index.closure(index.singleton(self.start_state()));
        let start_composite = index.composite(&start);
        let mut finals = BTreeSet::new();
        if index.is_accepting(&start) {
            finals.insert(start_composite.clone());
        }
        trace!("Add state: 0: {}", start_composite);

        let mut composites = vec![start_composite.clone()];
        let mut states_map: HashMap<BitSet, usize> = HashMap::new();
        states_map.insert(start.clone(), 0);
        let mut transitions = BTreeSet::new();

        let mut worklist = VecDeque::new();
        worklist.push_back((start, 0));
        while let Some((cur_states, cur_num)) = worklist.pop_front() {
            for symbol in self.alphabet() {
                let nxt_states = index.closure(index.step(&cur_states, symbol));

                // No move on this symbol
                if nxt_states.is_empty() {
                    continue;
                }

                let nxt_num = match states_map.get(&nxt_states) {
                    Some(&nxt_num) => nxt_num,
                    None => {
                        let nxt_num = composites.len();
                        let composite = index.composite(&nxt_states);
                        trace!("Add state: {}: {}", nxt_num, composite);
                        if index.is_accepting(&nxt_states) {
                            trace!("* State {} is accepting.", nxt_num);
                            finals.insert(composite.clone());
                        }
                        composites.push(composite);
                        states_map.insert(nxt_states.clone(), nxt_num);
                        worklist.push_back((nxt_states, nxt_num));
                        nxt_num
                    }
                };

                transitions.insert(Transition {
                    source: composites[cur_num].clone(),
                    symbol: Some(symbol.clone()),
                    target: composites[nxt_num].clone(),
                });
            }
        }

        debug!(
            "Subset construction: {} states -> {} composite states, {} transitions",
            self.states().len(),
            composites.len(),
            transitions.len()
        );

        FiniteAutomaton::from_parts(
            composites.into_iter().collect(),
            self.alphabet().clone(),
            transitions,
            start_composite,
            finals,
        )
    }

    /// Runs the automaton over `word`, following ε-moves after every symbol.
    pub fn accepts<I>(&self, word: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let index = StateIndex::new(self);
        let mut cur_states = index.closure(index.singleton(self.start_state()));
        for symbol in word {
            cur_states = index.closure(index.step(&cur_states, symbol.as_ref()));

            // Return early if "in stuck state"
            if cur_states.is_empty() {
                return false;
            }
        }
        index.is_accepting(&cur_states)
    }
}
