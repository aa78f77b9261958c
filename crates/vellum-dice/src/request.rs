//! Roll requests and the central evaluator.
//!
//! Every roll "kind" the application knows — attribute/save/skill checks,
//! weapon attacks, custom dice pools — is a [`RollRequest`] variant, and
//! one evaluator resolves them all so advantage and critical/fumble
//! policy live in exactly one place. Evaluation is a pure function of
//! `(request, source)`: no history, no hidden state, no partial results
//! (a malformed formula or an out-of-range modifier/advantage magnitude
//! fails before any die is drawn).

use serde::{Deserialize, Serialize};

use crate::error::{FormulaError, FormulaResult};
use crate::formula::{Die, Formula, MAX_MODIFIER_MAGNITUDE, Term};
use crate::rng::RollSource;
use crate::roll::{DieResult, RollResult, advantage, crit, roll_group};

/// A single-d20 check: attribute check, saving throw, skill check,
/// initiative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Flat modifier added to the kept die.
    pub modifier: i32,
    /// Signed advantage level: positive keeps highest, negative keeps
    /// lowest, zero rolls a single die.
    pub advantage: i32,
}

/// A weapon or ability attack: a damage formula paired with a d20
/// to-hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRequest {
    /// Damage formula, e.g. `"2d6+3"`.
    pub damage: String,
    /// To-hit bonus added to the to-hit d20.
    pub attack_bonus: i32,
    /// Advantage level applied to the to-hit roll.
    pub advantage: i32,
}

/// A custom dice pool rolled straight from a formula, with no
/// advantage and no critical/fumble policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRequest {
    /// The formula to roll, e.g. `"4d8 + 2d4 - 1"`.
    pub formula: String,
}

/// A roll the engine knows how to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollRequest {
    /// Single-d20 check with advantage resolution.
    Check(CheckRequest),
    /// Damage formula with paired to-hit, critical and fumble policy.
    Attack(AttackRequest),
    /// Raw formula evaluation.
    Pool(PoolRequest),
}

/// Evaluate a request against a roll source.
///
/// Draw order is part of the contract (scripted tests and the
/// first-rolled tie-break depend on it): checks draw their `1 + |level|`
/// d20s in order; attacks draw the to-hit dice first, then each damage
/// group left to right, then one bonus die per critical in detection
/// order; pools draw each group left to right.
pub fn perform_roll(
    request: &RollRequest,
    source: &mut impl RollSource,
) -> FormulaResult<RollResult> {
    match request {
        RollRequest::Check(check) => perform_check(check, source),
        RollRequest::Attack(attack) => perform_attack(attack, source),
        RollRequest::Pool(pool) => perform_pool(pool, source),
    }
}

fn perform_check(
    request: &CheckRequest,
    source: &mut impl RollSource,
) -> FormulaResult<RollResult> {
    // Magnitude limits before the first draw, same contract as parsing:
    // on error no dice count as drawn.
    if request.modifier.unsigned_abs() > MAX_MODIFIER_MAGNITUDE {
        return Err(FormulaError::LimitExceeded {
            what: "check modifier",
            value: i64::from(request.modifier),
            max: MAX_MODIFIER_MAGNITUDE,
        });
    }
    if request.advantage.unsigned_abs() > advantage::MAX_LEVEL {
        return Err(FormulaError::LimitExceeded {
            what: "advantage level",
            value: i64::from(request.advantage),
            max: advantage::MAX_LEVEL,
        });
    }

    let formula = Formula::d20_check(request.modifier);
    let resolved = advantage::resolve(Die::D20, request.advantage, source);
    Ok(RollResult::assemble(
        &formula,
        vec![resolved.kept],
        resolved.dropped,
        request.advantage,
        0,
        None,
    ))
}

fn perform_attack(
    request: &AttackRequest,
    source: &mut impl RollSource,
) -> FormulaResult<RollResult> {
    // Parse before the first draw: on error no dice count as drawn.
    let damage_formula = Formula::parse(&request.damage)?;

    let to_hit = perform_check(
        &CheckRequest {
            modifier: request.attack_bonus,
            advantage: request.advantage,
        },
        source,
    )?;

    let mut dice = roll_formula_groups(&damage_formula, source);
    let criticals = crit::amplify(&damage_formula, &mut dice, source);

    Ok(RollResult::assemble(
        &damage_formula,
        dice,
        Vec::new(),
        0,
        criticals,
        Some(to_hit),
    ))
}

fn perform_pool(request: &PoolRequest, source: &mut impl RollSource) -> FormulaResult<RollResult> {
    let formula = Formula::parse(&request.formula)?;
    let dice = roll_formula_groups(&formula, source);
    Ok(RollResult::assemble(&formula, dice, Vec::new(), 0, 0, None))
}

/// Roll every dice group of a formula, left to right.
fn roll_formula_groups(formula: &Formula, source: &mut impl RollSource) -> Vec<DieResult> {
    let mut dice = Vec::new();
    for (index, term) in formula.terms().iter().enumerate() {
        if let Term::Dice { count, die, .. } = term {
            dice.extend(roll_group(*die, *count, index, source));
        }
    }
    dice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;
    use crate::rng::ScriptedSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn check_with_advantage_two() {
        // Three d20s rolled, the max kept, modifier +2.
        let mut source = ScriptedSource::new([9, 17, 5]);
        let result = perform_roll(
            &RollRequest::Check(CheckRequest {
                modifier: 2,
                advantage: 2,
            }),
            &mut source,
        )
        .unwrap();
        assert_eq!(result.dice.len(), 1);
        assert_eq!(result.dropped_dice.len(), 2);
        assert_eq!(result.total, 19);
        assert_eq!(result.advantage_level, 2);
        assert_eq!(result.formula, "1d20 + 2");
        assert!(!result.is_critical_hit);
    }

    #[test]
    fn check_with_disadvantage_keeps_the_min() {
        let mut source = ScriptedSource::new([14, 6]);
        let result = perform_roll(
            &RollRequest::Check(CheckRequest {
                modifier: 0,
                advantage: -1,
            }),
            &mut source,
        )
        .unwrap();
        assert_eq!(result.natural(), Some(6));
        assert_eq!(result.total, 6);
        assert_eq!(result.dropped_dice.len(), 1);
    }

    #[test]
    fn pool_rolls_every_group_in_order() {
        let mut source = ScriptedSource::new([7, 2, 8, 1, 3]);
        let result = perform_roll(
            &RollRequest::Pool(PoolRequest {
                formula: "2d8+3d4-1".to_string(),
            }),
            &mut source,
        )
        .unwrap();
        assert_eq!(result.dice.len(), 5);
        assert_eq!(result.modifier, -1);
        assert_eq!(result.total, 7 + 2 + 8 + 1 + 3 - 1);
        assert!(result.dropped_dice.is_empty());
    }

    #[test]
    fn pool_with_minus_dice_subtracts_their_values() {
        let mut source = ScriptedSource::new([18, 3]);
        let result = perform_roll(
            &RollRequest::Pool(PoolRequest {
                formula: "1d20-1d4".to_string(),
            }),
            &mut source,
        )
        .unwrap();
        assert_eq!(result.total, 15);
        // Face values stay positive in the result.
        assert_eq!(result.dice[1].value, 3);
    }

    #[test]
    fn attack_crit_adds_a_bonus_die() {
        // to-hit d20 = 12, damage d8 maxes at 8, bonus d8 = 5.
        let mut source = ScriptedSource::new([12, 8, 5]);
        let result = perform_roll(
            &RollRequest::Attack(AttackRequest {
                damage: "1d8".to_string(),
                attack_bonus: 4,
                advantage: 0,
            }),
            &mut source,
        )
        .unwrap();
        assert_eq!(result.num_criticals, 1);
        assert!(result.is_critical_hit);
        assert_eq!(result.dice.len(), 2);
        assert_eq!(result.total, 13);
        assert!(!result.is_fumble);
        assert!(!result.is_miss);

        let to_hit = result.to_hit.as_deref().unwrap();
        assert_eq!(to_hit.natural(), Some(12));
        assert_eq!(to_hit.total, 16);
        assert_eq!(to_hit.formula, "1d20 + 4");
    }

    #[test]
    fn attack_natural_one_is_a_fumble_and_a_miss() {
        // Damage still rolls (and even crits) but the roll is a miss.
        let mut source = ScriptedSource::new([1, 6, 4]);
        let result = perform_roll(
            &RollRequest::Attack(AttackRequest {
                damage: "1d6".to_string(),
                attack_bonus: 7,
                advantage: 0,
            }),
            &mut source,
        )
        .unwrap();
        assert!(result.is_fumble);
        assert!(result.is_miss);
        assert!(result.is_critical_hit);
        assert_eq!(result.total, 10);
        assert_eq!(result.to_hit.as_deref().unwrap().total, 8);
    }

    #[test]
    fn attack_to_hit_respects_advantage() {
        // Disadvantage: the natural 1 is kept even though a 15 was rolled.
        let mut source = ScriptedSource::new([15, 1, 3]);
        let result = perform_roll(
            &RollRequest::Attack(AttackRequest {
                damage: "1d6".to_string(),
                attack_bonus: 0,
                advantage: -1,
            }),
            &mut source,
        )
        .unwrap();
        assert!(result.is_fumble);
        let to_hit = result.to_hit.as_deref().unwrap();
        assert_eq!(to_hit.natural(), Some(1));
        assert_eq!(to_hit.dropped_dice[0].value, 15);
    }

    #[test]
    fn malformed_attack_draws_no_dice() {
        let mut source = ScriptedSource::new([20, 20, 20]);
        let result = perform_roll(
            &RollRequest::Attack(AttackRequest {
                damage: "2d6++3".to_string(),
                attack_bonus: 5,
                advantage: 1,
            }),
            &mut source,
        );
        assert!(matches!(result, Err(FormulaError::Syntax { .. })));
        assert_eq!(source.remaining(), 3);
    }

    #[test]
    fn overflowing_modifier_sum_is_rejected_not_evaluated() {
        // Each literal fits i32 on its own; only the aggregate is out
        // of range, and it must surface as an error rather than wrap.
        let mut source = ScriptedSource::new([]);
        let result = perform_roll(
            &RollRequest::Pool(PoolRequest {
                formula: "2000000000+2000000000".to_string(),
            }),
            &mut source,
        );
        assert!(matches!(result, Err(FormulaError::Syntax { .. })));
    }

    #[test]
    fn huge_dice_counts_are_rejected_before_rolling() {
        let mut source = ScriptedSource::new([]);
        let result = perform_roll(
            &RollRequest::Pool(PoolRequest {
                formula: "600000000d6".to_string(),
            }),
            &mut source,
        );
        assert!(matches!(result, Err(FormulaError::Syntax { .. })));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn check_magnitude_limits_draw_no_dice() {
        let mut source = ScriptedSource::new([20, 20]);
        let result = perform_roll(
            &RollRequest::Check(CheckRequest {
                modifier: i32::MAX,
                advantage: 0,
            }),
            &mut source,
        );
        assert!(matches!(
            result,
            Err(FormulaError::LimitExceeded {
                what: "check modifier",
                ..
            })
        ));

        let result = perform_roll(
            &RollRequest::Check(CheckRequest {
                modifier: 0,
                advantage: i32::MIN,
            }),
            &mut source,
        );
        assert!(matches!(
            result,
            Err(FormulaError::LimitExceeded {
                what: "advantage level",
                ..
            })
        ));
        assert_eq!(source.remaining(), 2);
    }

    #[test]
    fn attack_bonus_magnitude_limit_applies_to_the_to_hit() {
        let mut source = ScriptedSource::new([20, 20]);
        let result = perform_roll(
            &RollRequest::Attack(AttackRequest {
                damage: "1d6".to_string(),
                attack_bonus: -20_000,
                advantage: 0,
            }),
            &mut source,
        );
        assert!(matches!(result, Err(FormulaError::LimitExceeded { .. })));
        assert_eq!(source.remaining(), 2);
    }

    #[test]
    fn unsupported_die_propagates() {
        let mut source = ScriptedSource::new([]);
        let result = perform_roll(
            &RollRequest::Pool(PoolRequest {
                formula: "1d7".to_string(),
            }),
            &mut source,
        );
        assert!(matches!(
            result,
            Err(FormulaError::UnsupportedDie { sides: 7, .. })
        ));
    }

    #[test]
    fn seeded_rolls_replay_identically() {
        let request = RollRequest::Attack(AttackRequest {
            damage: "2d6+3".to_string(),
            attack_bonus: 5,
            advantage: 1,
        });
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);
        assert_eq!(
            perform_roll(&request, &mut a).unwrap(),
            perform_roll(&request, &mut b).unwrap()
        );
    }
}
