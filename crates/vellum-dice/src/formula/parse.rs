//! Left-to-right lexical parser for dice notation.
//!
//! The grammar is one precedence level: a formula is one or more terms
//! separated by `+` or `-`, where the sign attaches to the following
//! term. A term is either a dice group `<count>d<sides>` (count
//! omissible, `d20` ≡ `1d20`) or a bare unsigned integer modifier.
//! Whitespace around operators is ignored; consecutive signs, empty
//! input, zero counts, missing die sizes and stray characters are
//! syntax errors, and a die size outside the supported set is an
//! [`FormulaError::UnsupportedDie`].
//!
//! Magnitude limits are enforced here too: a formula may roll at most
//! [`MAX_TOTAL_DICE`] dice, and the magnitudes of its flat modifiers
//! may sum to at most [`MAX_MODIFIER_MAGNITUDE`]. Within those bounds
//! every downstream total fits `i32`.

use crate::error::{FormulaError, FormulaResult};
use crate::formula::{Die, Formula, MAX_MODIFIER_MAGNITUDE, MAX_TOTAL_DICE, Sign, Term};

/// Parse `source` into a [`Formula`].
///
/// Pure and deterministic: the same string always yields structurally
/// identical terms in the same order.
pub fn formula(source: &str) -> FormulaResult<Formula> {
    let mut parser = Parser {
        source,
        bytes: source.as_bytes(),
        pos: 0,
    };
    let terms = parser.run()?;
    Ok(Formula::from_parts(source.to_string(), terms))
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn run(&mut self) -> FormulaResult<Vec<Term>> {
        let mut terms = Vec::new();
        let mut total_dice: u64 = 0;
        let mut modifier_magnitude: u64 = 0;

        self.skip_whitespace();
        if self.at_end() {
            return Err(self.syntax("empty formula"));
        }

        loop {
            let sign = if terms.is_empty() {
                self.take_sign().unwrap_or(Sign::Plus)
            } else {
                match self.take_sign() {
                    Some(sign) => sign,
                    None => {
                        return Err(self.syntax(format!(
                            "expected '+' or '-' before '{}'",
                            self.rest()
                        )));
                    }
                }
            };

            self.skip_whitespace();
            if self.at_end() {
                return Err(self.syntax("dangling operator"));
            }
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                return Err(self.syntax("consecutive operators"));
            }

            let term = self.term(sign)?;
            match term {
                Term::Dice { count, .. } => {
                    total_dice += u64::from(count);
                    if total_dice > u64::from(MAX_TOTAL_DICE) {
                        return Err(self.syntax(format!(
                            "more than {MAX_TOTAL_DICE} dice in one formula"
                        )));
                    }
                }
                Term::Modifier(value) => {
                    modifier_magnitude += u64::from(value.unsigned_abs());
                    if modifier_magnitude > u64::from(MAX_MODIFIER_MAGNITUDE) {
                        return Err(self.syntax(format!(
                            "combined modifier magnitude exceeds {MAX_MODIFIER_MAGNITUDE}"
                        )));
                    }
                }
            }
            terms.push(term);

            self.skip_whitespace();
            if self.at_end() {
                return Ok(terms);
            }
        }
    }

    /// One term: `<count>d<sides>`, `d<sides>`, or a bare integer.
    fn term(&mut self, sign: Sign) -> FormulaResult<Term> {
        let count = if self.peek() == Some(b'd') {
            None
        } else {
            match self.take_number()? {
                Some(n) => Some(n),
                None => {
                    return Err(self.syntax(format!(
                        "unexpected character '{}'",
                        self.rest().chars().next().unwrap_or(' ')
                    )));
                }
            }
        };

        if self.peek() == Some(b'd') {
            self.pos += 1;
            let sides = self
                .take_number()?
                .ok_or_else(|| self.syntax("missing die size after 'd'"))?;
            let die = Die::from_sides(sides).ok_or_else(|| FormulaError::UnsupportedDie {
                formula: self.source.to_string(),
                sides,
            })?;
            let count = count.unwrap_or(1);
            if count == 0 {
                return Err(self.syntax("dice count must be at least 1"));
            }
            return Ok(Term::Dice { count, die, sign });
        }

        // No 'd' followed the digits, so this is a flat modifier.
        let magnitude = count.unwrap_or(0);
        let value = i32::try_from(magnitude)
            .map_err(|_| self.syntax("modifier too large"))?;
        Ok(Term::Modifier(sign.factor() * value))
    }

    /// A run of ASCII digits, or `None` if the next byte is not a digit.
    fn take_number(&mut self) -> FormulaResult<Option<u32>> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(None);
        }
        self.source[start..self.pos]
            .parse::<u32>()
            .map(Some)
            .map_err(|_| self.syntax("number too large"))
    }

    fn take_sign(&mut self) -> Option<Sign> {
        match self.peek() {
            Some(b'+') => {
                self.pos += 1;
                Some(Sign::Plus)
            }
            Some(b'-') => {
                self.pos += 1;
                Some(Sign::Minus)
            }
            _ => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn rest(&self) -> &str {
        self.source.get(self.pos..).unwrap_or("")
    }

    fn syntax(&self, reason: impl Into<String>) -> FormulaError {
        FormulaError::Syntax {
            formula: self.source.to_string(),
            reason: reason.into(),
        }
    }
}
