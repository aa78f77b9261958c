//! Roll results and aggregation.
//!
//! A [`RollResult`] is created once by [`RollResult::assemble`] and then
//! treated as an immutable value: the caller displays it and appends it
//! verbatim to its activity log. The total is always recomputed from the
//! kept dice plus the flat modifier, never carried from upstream, and
//! every die physically drawn ends up in exactly one of `dice` or
//! `dropped_dice` so no roll information is silently lost.

pub mod advantage;
pub mod crit;

use serde::{Deserialize, Serialize};

use crate::formula::{Die, Formula};
use crate::rng::RollSource;

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to `die.sides()`). Never negative — a minus
    /// group negates its contribution at summation time only.
    pub value: u32,
    /// Index of the originating term within the formula's term list.
    pub group: usize,
    /// False when advantage/disadvantage resolution dropped this die.
    pub kept: bool,
}

/// One complete, immutable roll: kept and dropped dice, flags, total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Canonical text of the formula that was rolled.
    pub formula: String,
    /// Dice that count toward the total.
    pub dice: Vec<DieResult>,
    /// Dice rolled but dropped by advantage/disadvantage resolution,
    /// retained so the UI can show what was rolled but not counted.
    pub dropped_dice: Vec<DieResult>,
    /// Sum of the formula's flat-modifier terms.
    pub modifier: i32,
    /// `Σ sign·value` over kept dice, plus `modifier`. Recomputed at
    /// assembly; never mutated afterwards.
    pub total: i32,
    /// Signed advantage level this roll was made at (0 for damage and
    /// pool rolls).
    pub advantage_level: i32,
    /// True when at least one kept damage die showed its maximum face.
    pub is_critical_hit: bool,
    /// How many kept dice showed their maximum face (each one added a
    /// bonus die of the same type).
    pub num_criticals: u32,
    /// True when the paired to-hit die landed on a natural 1.
    pub is_fumble: bool,
    /// True when the roll resolves as a miss. A fumble is always a miss;
    /// consumers must treat a miss as "no effect" even if criticals were
    /// also rolled on the damage dice.
    pub is_miss: bool,
    /// The paired to-hit roll for attacks, itself a check-style result
    /// (one kept d20, advantage bookkeeping of its own). `None` for
    /// checks and pool rolls.
    pub to_hit: Option<Box<RollResult>>,
}

impl RollResult {
    /// Assemble a result from roller output and advantage/critical
    /// bookkeeping. Pure aggregation, no randomness.
    ///
    /// The total is recomputed here from the kept dice (applying each
    /// group's sign from `formula`) plus the flat modifier, rather than
    /// trusting any intermediate partial sum.
    pub fn assemble(
        formula: &Formula,
        dice: Vec<DieResult>,
        dropped_dice: Vec<DieResult>,
        advantage_level: i32,
        num_criticals: u32,
        to_hit: Option<RollResult>,
    ) -> Self {
        let modifier = formula.flat_modifier();
        // Parse-time magnitude caps keep this sum inside i32.
        let total = dice
            .iter()
            .filter(|d| d.kept)
            .map(|d| formula.sign_factor(d.group) * d.value as i32)
            .sum::<i32>()
            + modifier;

        let is_fumble = to_hit.as_ref().is_some_and(|t| t.natural() == Some(1));

        Self {
            formula: formula.canonical(),
            dice,
            dropped_dice,
            modifier,
            total,
            advantage_level,
            is_critical_hit: num_criticals > 0,
            num_criticals,
            is_fumble,
            is_miss: is_fumble,
            to_hit: to_hit.map(Box::new),
        }
    }

    /// The face value of the first kept die.
    ///
    /// For check-style rolls exactly one die is kept, so this is the
    /// natural roll (fumble detection reads it on the to-hit).
    pub fn natural(&self) -> Option<u32> {
        self.dice.first().map(|d| d.value)
    }

    /// Every die physically rolled for this invocation, kept first.
    pub fn all_dice(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().chain(self.dropped_dice.iter())
    }

    /// Number of dice physically rolled (kept + dropped).
    pub fn rolled_count(&self) -> usize {
        self.dice.len() + self.dropped_dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(f, "[{}]", values.join(", "))?;
        if !self.dropped_dice.is_empty() {
            let dropped: Vec<String> = self
                .dropped_dice
                .iter()
                .map(|d| d.value.to_string())
                .collect();
            write!(f, " (dropped {})", dropped.join(", "))?;
        }
        if self.modifier > 0 {
            write!(f, " + {}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, " - {}", self.modifier.unsigned_abs())?;
        }
        write!(f, " = {}", self.total)
    }
}

/// Roll one dice group: `count` independent draws bounded to the die's
/// faces, each tagged with the originating term index and marked kept.
pub fn roll_group(
    die: Die,
    count: u32,
    group: usize,
    source: &mut impl RollSource,
) -> Vec<DieResult> {
    (0..count)
        .map(|_| DieResult {
            die,
            value: source.draw(die.sides()),
            group,
            kept: true,
        })
        .collect()
}
