//! Error types for the dice engine.
//!
//! There are exactly three failure classes: a malformed formula string,
//! a request for a die size outside the supported polyhedral set, and a
//! numeric input beyond the engine's magnitude limits. Randomness never
//! fails, and advantage/critical/fumble resolution are total over
//! accepted input, so evaluation either returns a complete
//! [`crate::RollResult`] or one of these errors before any die is drawn.

/// Errors raised while parsing or evaluating a dice formula.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// The formula string is malformed: empty, doubled or trailing
    /// operators, a zero dice count, a missing die size, or a stray
    /// character.
    #[error("invalid dice formula '{formula}': {reason}")]
    Syntax {
        /// The offending formula as supplied by the caller.
        formula: String,
        /// What the parser objected to.
        reason: String,
    },

    /// A die size outside {4, 6, 8, 10, 12, 20, 100} was requested.
    #[error("unsupported die size d{sides} in '{formula}'")]
    UnsupportedDie {
        /// The offending formula as supplied by the caller.
        formula: String,
        /// The requested number of sides.
        sides: u32,
    },

    /// A request field (check modifier, attack bonus, advantage level)
    /// exceeded the engine's magnitude limit. Formula-level limits are
    /// reported as [`FormulaError::Syntax`] instead, with the offending
    /// formula attached.
    #[error("{what} {value} exceeds the supported magnitude of {max}")]
    LimitExceeded {
        /// Which input was out of range.
        what: &'static str,
        /// The value the caller supplied.
        value: i64,
        /// The largest accepted magnitude.
        max: u32,
    },
}

/// Convenience result type for engine operations.
pub type FormulaResult<T> = Result<T, FormulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_formula() {
        let err = FormulaError::Syntax {
            formula: "2d6++3".to_string(),
            reason: "consecutive operators".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid dice formula '2d6++3': consecutive operators"
        );

        let err = FormulaError::UnsupportedDie {
            formula: "1d7".to_string(),
            sides: 7,
        };
        assert_eq!(err.to_string(), "unsupported die size d7 in '1d7'");

        let err = FormulaError::LimitExceeded {
            what: "advantage level",
            value: -2_000_000,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "advantage level -2000000 exceeds the supported magnitude of 100"
        );
    }
}
