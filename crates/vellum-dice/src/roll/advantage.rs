//! Advantage and disadvantage resolution for single-die checks.
//!
//! An advantage level is a single signed integer set by the caller:
//! `+N` rolls `1 + N` dice and keeps the highest, `-N` rolls `1 + N`
//! dice and keeps the lowest, `0` rolls exactly one die. The resolver
//! knows nothing about *sources* of advantage — levels never cancel
//! here, they arrive already combined.

use crate::formula::Die;
use crate::rng::RollSource;
use crate::roll::DieResult;

/// Largest advantage magnitude the engine accepts. The evaluator
/// rejects levels beyond it before any die is drawn, which bounds the
/// dice rolled per check.
pub const MAX_LEVEL: u32 = 100;

/// Kept/dropped partition produced by advantage resolution.
///
/// Exactly one die is kept; the other `|level|` dice are retained as
/// dropped so the UI can show what was rolled but not counted.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The single die that counts toward the check total.
    pub kept: DieResult,
    /// Everything else rolled for the check, in draw order.
    pub dropped: Vec<DieResult>,
}

/// Roll `1 + |level|` dice of `die` and keep one extreme.
///
/// Ties on the extreme value are broken by draw order: the first die
/// rolled wins, the numerically equal rest are dropped. Dice are tagged
/// with group 0 — check formulas always put their single dice term
/// first.
pub fn resolve(die: Die, level: i32, source: &mut impl RollSource) -> Resolved {
    let rolls = 1 + level.unsigned_abs() as usize;
    let mut dice: Vec<DieResult> = (0..rolls)
        .map(|_| DieResult {
            die,
            value: source.draw(die.sides()),
            group: 0,
            kept: true,
        })
        .collect();

    // Strict comparison keeps the first-rolled die on ties.
    let keep_highest = level >= 0;
    let mut keep = 0;
    for (index, candidate) in dice.iter().enumerate().skip(1) {
        let better = if keep_highest {
            candidate.value > dice[keep].value
        } else {
            candidate.value < dice[keep].value
        };
        if better {
            keep = index;
        }
    }

    for (index, die_result) in dice.iter_mut().enumerate() {
        die_result.kept = index == keep;
    }
    let kept = dice.remove(keep);
    Resolved {
        kept,
        dropped: dice,
    }
}
