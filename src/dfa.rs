use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use crate::automaton::{FiniteAutomaton, State};

/// A state of a deterministic automaton built by subset construction: the set
/// of source states it stands for.
///
/// Two composite states are the same state exactly when they have the same
/// members, whatever order those members were found in.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompositeState<S = State> {
    members: BTreeSet<S>,
}

/// A deterministic automaton over composite states.
pub type Dfa<S = State> = FiniteAutomaton<CompositeState<S>>;

impl<S: Ord> CompositeState<S> {
    pub fn contains(&self, state: &S) -> bool {
        self.members.contains(state)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, S> {
        self.members.iter()
    }

    pub fn members(&self) -> &BTreeSet<S> {
        &self.members
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.members.is_subset(&other.members)
    }

    /// The only member, if there is exactly one.
    pub fn single(&self) -> Option<&S> {
        if self.members.len() == 1 {
            self.members.iter().next()
        } else {
            None
        }
    }
}

impl<S: Ord> FromIterator<S> for CompositeState<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CompositeState {
            members: iter.into_iter().collect(),
        }
    }
}

impl<S: Ord> From<BTreeSet<S>> for CompositeState<S> {
    fn from(members: BTreeSet<S>) -> Self {
        CompositeState { members }
    }
}

impl<'a, S> IntoIterator for &'a CompositeState<S> {
    type Item = &'a S;
    type IntoIter = btree_set::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<S: fmt::Display> fmt::Display for CompositeState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", member)?;
        }
        write!(f, "}}")
    }
}
