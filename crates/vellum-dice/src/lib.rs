//! Dice formula engine for the Vellum character-sheet companion.
//!
//! Parses dice notation (`"2d6+3"`, `"d20"`, `"4d8 + 2d4 - 1"`) and
//! evaluates it into structured, replayable [`RollResult`] values:
//! every die physically rolled is retained (kept or dropped), totals are
//! recomputed from the kept dice, and advantage/disadvantage, critical
//! hits and fumbles are resolved by one central evaluator.
//!
//! The engine is a pure function of a [`RollRequest`] and a
//! [`RollSource`]: it holds no history, touches no global RNG, and does
//! no I/O. Callers own the generator (seed it for replay, script it for
//! tests) and are responsible for logging and display of the result.

pub mod error;
pub mod formula;
pub mod request;
pub mod rng;
pub mod roll;

pub use error::{FormulaError, FormulaResult};
pub use formula::{Die, Formula, MAX_MODIFIER_MAGNITUDE, MAX_TOTAL_DICE, Sign, Term};
pub use request::{AttackRequest, CheckRequest, PoolRequest, RollRequest, perform_roll};
pub use rng::{RollSource, ScriptedSource};
pub use roll::{DieResult, RollResult};
