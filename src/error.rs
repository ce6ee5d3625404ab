use std::fmt;

/// Why an automaton description was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedAutomatonError {
    /// The reserved ε symbol was declared as part of the alphabet.
    ReservedSymbol,
    UnknownStartState(String),
    UnknownFinalState(String),
    /// A transition starts or ends in a state that was not declared.
    UnknownState { transition: String, state: String },
    /// A non-ε transition is labelled with a symbol outside the alphabet.
    UnknownSymbol { transition: String, symbol: String },
}

impl fmt::Display for MalformedAutomatonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MalformedAutomatonError::*;
        match self {
            ReservedSymbol => write!(f, "the alphabet must not contain ε"),
            UnknownStartState(state) => write!(f, "start state {} is not a declared state", state),
            UnknownFinalState(state) => write!(f, "final state {} is not a declared state", state),
            UnknownState { transition, state } => {
                write!(f, "transition {} uses undeclared state {}", transition, state)
            }
            UnknownSymbol { transition, symbol } => write!(
                f,
                "transition {} uses symbol {} which is not in the alphabet",
                transition, symbol
            ),
        }
    }
}

impl std::error::Error for MalformedAutomatonError {}

/// Information about where and why a pattern could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedPatternError {
    pub kind: PatternErrorKind,
    /// Character offset into the pattern.
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternErrorKind {
    MissingCount,
    MultiDigitCount,
    UnclosedGroup,
    EmptyGroup,
    NestedGroup,
    UnmatchedRightParen,
    DanglingOperator(char),
    UnexpectedCharacter(char),
}

impl MalformedPatternError {
    pub(crate) fn new(kind: PatternErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

impl fmt::Display for PatternErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PatternErrorKind::*;
        match *self {
            MissingCount => write!(f, "expected a digit after '^'"),
            MultiDigitCount => write!(f, "counts after '^' are a single digit"),
            UnclosedGroup => write!(f, "expected RIGHT_PAREN to close the group"),
            EmptyGroup => write!(f, "expected at least one choice in the group"),
            NestedGroup => write!(f, "groups cannot be nested"),
            UnmatchedRightParen => write!(f, "RIGHT_PAREN without a matching LEFT_PAREN"),
            DanglingOperator(op) => write!(f, "operator '{}' does not follow a literal", op),
            UnexpectedCharacter(c) => write!(f, "unexpected character '{}'", c),
        }
    }
}

impl fmt::Display for MalformedPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] ({}): {}", self.pos, self.kind)
    }
}

impl std::error::Error for MalformedPatternError {}
