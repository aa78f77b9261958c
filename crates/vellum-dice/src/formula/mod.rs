//! Dice formula types: dice, terms, and parsed formulas.
//!
//! A formula is an additive sequence of dice groups and flat modifiers,
//! e.g. `"2d6+3"` or `"4d8 + 2d4 - 1"`. There is no nesting and no
//! multiplication: the grammar is one precedence level, so a parsed
//! formula is simply an ordered list of signed [`Term`]s.

pub mod parse;

use serde::{Deserialize, Serialize};

use crate::error::FormulaResult;

/// Most dice a single formula may roll across all of its groups.
///
/// Enforced at parse time. Together with [`MAX_MODIFIER_MAGNITUDE`]
/// this keeps every total (including critical bonus dice, which at most
/// double a group) far inside `i32`, so summation never overflows.
pub const MAX_TOTAL_DICE: u32 = 100;

/// Largest combined magnitude of a formula's flat modifiers, and the
/// bound on check modifiers and attack bonuses.
pub const MAX_MODIFIER_MAGNITUDE: u32 = 10_000;

/// A polyhedral die from the supported set.
///
/// Unlike freeform dice-roller notations there is no custom side count;
/// anything outside this set is rejected at parse time with
/// [`crate::FormulaError::UnsupportedDie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// Maps a side count to a die, or `None` if the size is unsupported.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            _ => None,
        }
    }

    /// The maximum face value — a die showing this face is a critical
    /// candidate on attack rolls.
    pub fn max_face(self) -> u32 {
        self.sides()
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// The sign attached to a dice group.
///
/// A minus group contributes the negated face values to the total; the
/// face values themselves are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sign {
    /// The group adds to the total.
    #[default]
    Plus,
    /// The group subtracts from the total ("minus dice").
    Minus,
}

impl Sign {
    /// Multiplication factor applied at total-summation time.
    pub fn factor(self) -> i32 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }
}

/// One additive term of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// A group of dice, e.g. `2d6` or `-1d4`. `count` is at least 1.
    Dice {
        /// How many dice to roll.
        count: u32,
        /// The die type rolled by every die in the group.
        die: Die,
        /// Whether the group adds to or subtracts from the total.
        sign: Sign,
    },
    /// A flat signed modifier, e.g. `+3` or `-1`.
    Modifier(i32),
}

/// A parsed dice formula: ordered terms plus the original source text.
///
/// Immutable once produced. The source string is retained verbatim for
/// display and audit; [`Formula::to_string`] renders the canonical form
/// instead, which re-parses to the same term sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    source: String,
    terms: Vec<Term>,
}

impl Formula {
    /// Parse a formula string. See [`parse`] for the grammar.
    pub fn parse(source: &str) -> FormulaResult<Self> {
        parse::formula(source)
    }

    /// Build the formula for a d20 check: `1d20` plus an optional flat
    /// modifier. Used by the check and attack to-hit paths so that every
    /// roll carries a real formula.
    pub fn d20_check(modifier: i32) -> Self {
        let mut terms = vec![Term::Dice {
            count: 1,
            die: Die::D20,
            sign: Sign::Plus,
        }];
        if modifier != 0 {
            terms.push(Term::Modifier(modifier));
        }
        let mut formula = Self {
            source: String::new(),
            terms,
        };
        formula.source = formula.canonical();
        formula
    }

    /// The formula text exactly as the caller supplied it.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The ordered terms of the formula.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Sum of all flat-modifier terms.
    pub fn flat_modifier(&self) -> i32 {
        self.terms
            .iter()
            .map(|t| match t {
                Term::Modifier(value) => *value,
                Term::Dice { .. } => 0,
            })
            .sum()
    }

    /// The sign factor of the term at `index`, treating modifier terms
    /// as positive.
    ///
    /// `index` must refer to a term of this formula; every die result
    /// carries the index of the dice term that produced it (bonus dice
    /// inherit their trigger's group), so a stray index is an upstream
    /// bug and is debug-asserted rather than masked.
    pub fn sign_factor(&self, index: usize) -> i32 {
        debug_assert!(
            index < self.terms.len(),
            "term index {index} out of range for '{}'",
            self.source
        );
        match self.terms.get(index) {
            Some(Term::Dice { sign, .. }) => sign.factor(),
            _ => 1,
        }
    }

    /// Canonical text: terms joined with ` + ` / ` - `, counts always
    /// explicit. Re-parsing the canonical text yields the same terms.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (index, term) in self.terms.iter().enumerate() {
            let (negative, body) = match term {
                Term::Dice { count, die, sign } => {
                    (*sign == Sign::Minus, format!("{count}{die}"))
                }
                Term::Modifier(value) => (*value < 0, value.unsigned_abs().to_string()),
            };
            if index == 0 {
                if negative {
                    out.push('-');
                }
            } else if negative {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            out.push_str(&body);
        }
        out
    }

    pub(crate) fn from_parts(source: String, terms: Vec<Term>) -> Self {
        Self { source, terms }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
