//! Random strings from a small regular-expression-like pattern language.
//!
//! A pattern is a sequence of pieces:
//!
//! * a letter or digit, emitted once, or followed by an operator:
//!   `^k` exactly `k` times, `*` zero to five times, `+` one to five times,
//!   `?` half of the time;
//! * a group `(a|b|...)` choosing one of the enclosed characters, or `k`
//!   characters (with repetition) when followed by `^k`.
//!
//! Counts after `^` are a single digit and never exceed five; `a^12` is
//! rejected rather than read as `a^1` followed by the literal `2`.

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use log::trace;
use rand::Rng;

use crate::error::{MalformedPatternError, PatternErrorKind};

/// Upper bound on every repetition count.
pub const MAX_REPETITIONS: usize = 5;

/// The random choices a pattern needs.
pub trait RandomSource {
    /// A count in `min..=max`.
    fn count(&mut self, min: usize, max: usize) -> usize;

    /// A fair coin.
    fn flip(&mut self) -> bool;

    /// An index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn count(&mut self, min: usize, max: usize) -> usize {
        self.gen_range(min..=max)
    }

    fn flip(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Quantifier {
    Once,
    Exactly(usize),
    Asterisk,
    Plus,
    QuestionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Literal(char, Quantifier),
    Group(Vec<char>, Option<usize>),
}

impl Piece {
    fn sample<R: RandomSource + ?Sized>(&self, random: &mut R, out: &mut String) {
        match *self {
            Piece::Literal(c, quantifier) => {
                let times = match quantifier {
                    Quantifier::Once => 1,
                    Quantifier::Exactly(n) => n,
                    Quantifier::Asterisk => random.count(0, MAX_REPETITIONS),
                    Quantifier::Plus => random.count(1, MAX_REPETITIONS),
                    Quantifier::QuestionMark => random.flip() as usize,
                };
                out.extend(std::iter::repeat(c).take(times));
            }
            Piece::Group(ref choices, count) => {
                for _ in 0..count.unwrap_or(1) {
                    out.push(choices[random.pick(choices.len())]);
                }
            }
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Literal(c, quantifier) => {
                write!(f, "{}", c)?;
                match quantifier {
                    Quantifier::Once => Ok(()),
                    Quantifier::Exactly(n) => write!(f, "^{}", n),
                    Quantifier::Asterisk => write!(f, "*"),
                    Quantifier::Plus => write!(f, "+"),
                    Quantifier::QuestionMark => write!(f, "?"),
                }
            }
            Piece::Group(choices, count) => {
                write!(f, "(")?;
                for (i, c) in choices.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, ")")?;
                match count {
                    Some(n) => write!(f, "^{}", n),
                    None => Ok(()),
                }
            }
        }
    }
}

/// A parsed pattern, ready to be sampled any number of times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pieces: Vec<Piece>,
}

impl Pattern {
    pub fn parse(pattern: &str) -> Result<Self, MalformedPatternError> {
        Parser::new(pattern).parse()
    }

    /// Draws one string.
    pub fn sample<R: RandomSource + ?Sized>(&self, random: &mut R) -> String {
        let mut result = String::new();
        let mut prefix = String::new();
        for piece in &self.pieces {
            let start = result.len();
            piece.sample(random, &mut result);
            if log::log_enabled!(log::Level::Trace) {
                prefix.push_str(&piece.to_string());
                trace!("{} -> {}", prefix, &result[start..]);
            }
        }
        result
    }
}

impl FromStr for Pattern {
    type Err = MalformedPatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            write!(f, "{}", piece)?;
        }
        Ok(())
    }
}

/// Generates one string matching `pattern` using the thread-local generator.
pub fn generate(pattern: &str) -> Result<String, MalformedPatternError> {
    generate_with(pattern, &mut rand::thread_rng())
}

/// Generates one string matching `pattern`, drawing every choice from `random`.
pub fn generate_with<R: RandomSource + ?Sized>(
    pattern: &str,
    random: &mut R,
) -> Result<String, MalformedPatternError> {
    Ok(Pattern::parse(pattern)?.sample(random))
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser {
            chars: source.char_indices().peekable(),
            source,
        }
    }

    /// Character offset of the byte offset `at`.
    fn pos(&self, at: usize) -> usize {
        self.source[..at].chars().count()
    }

    fn error(&self, kind: PatternErrorKind, at: usize) -> MalformedPatternError {
        MalformedPatternError::new(kind, self.pos(at))
    }

    fn parse(mut self) -> Result<Pattern, MalformedPatternError> {
        let mut pieces = Vec::new();
        while let Some((at, c)) = self.chars.next() {
            let piece = match c {
                '(' => {
                    let choices = self.group(at)?;
                    let count = self.count()?;
                    Piece::Group(choices, count)
                }
                ')' => return Err(self.error(PatternErrorKind::UnmatchedRightParen, at)),
                '^' | '*' | '+' | '?' | '|' => {
                    return Err(self.error(PatternErrorKind::DanglingOperator(c), at))
                }
                c if c.is_alphanumeric() => Piece::Literal(c, self.quantifier()?),
                c => return Err(self.error(PatternErrorKind::UnexpectedCharacter(c), at)),
            };
            pieces.push(piece);
        }
        Ok(Pattern { pieces })
    }

    /// Choices up to the closing paren; `open` is where the group started.
    fn group(&mut self, open: usize) -> Result<Vec<char>, MalformedPatternError> {
        let mut choices = Vec::new();
        loop {
            match self.chars.next() {
                None => return Err(self.error(PatternErrorKind::UnclosedGroup, open)),
                Some((at, '(')) => return Err(self.error(PatternErrorKind::NestedGroup, at)),
                Some((at, ')')) if choices.is_empty() => {
                    return Err(self.error(PatternErrorKind::EmptyGroup, at))
                }
                Some((_, ')')) => return Ok(choices),
                Some((_, '|')) => {}
                Some((_, c)) => {
                    if !choices.contains(&c) {
                        choices.push(c);
                    }
                }
            }
        }
    }

    fn quantifier(&mut self) -> Result<Quantifier, MalformedPatternError> {
        let quantifier = match self.chars.peek() {
            Some(&(_, '^')) => return self.count().map(|n| Quantifier::Exactly(n.unwrap_or(1))),
            Some(&(_, '*')) => Quantifier::Asterisk,
            Some(&(_, '+')) => Quantifier::Plus,
            Some(&(_, '?')) => Quantifier::QuestionMark,
            _ => return Ok(Quantifier::Once),
        };
        self.chars.next();
        Ok(quantifier)
    }

    /// An optional `^<digit>` suffix, capped at `MAX_REPETITIONS`.
    fn count(&mut self) -> Result<Option<usize>, MalformedPatternError> {
        let caret = match self.chars.peek() {
            Some(&(at, '^')) => at,
            _ => return Ok(None),
        };
        self.chars.next();
        match self.chars.next() {
            Some((_, c)) if c.is_ascii_digit() => {
                if let Some(&(at, d)) = self.chars.peek() {
                    if d.is_ascii_digit() {
                        return Err(self.error(PatternErrorKind::MultiDigitCount, at));
                    }
                }
                let n = c.to_digit(10).map_or(0, |d| d as usize);
                Ok(Some(n.min(MAX_REPETITIONS)))
            }
            _ => Err(self.error(PatternErrorKind::MissingCount, caret)),
        }
    }
}
