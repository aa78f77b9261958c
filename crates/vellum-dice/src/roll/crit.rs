//! Critical-hit classification and amplification for attack damage.
//!
//! Every kept damage die that shows its own maximum face counts as one
//! critical instance and earns one bonus die of the same type, added to
//! the kept set and the total. The bonus die does not explode again —
//! amplification inspects only the dice present when it starts.

use crate::formula::{Die, Formula};
use crate::rng::RollSource;
use crate::roll::DieResult;

/// Count maxed kept dice and roll one bonus die for each.
///
/// Only plus-signed groups are inspected: a maxed die in a "minus dice"
/// group is the worst face for the roller, not a critical, and is left
/// alone. Bonus dice inherit the group of the die that triggered them
/// and are appended in detection order. Returns the number of criticals.
pub fn amplify(formula: &Formula, dice: &mut Vec<DieResult>, source: &mut impl RollSource) -> u32 {
    let triggers: Vec<(usize, Die)> = dice
        .iter()
        .filter(|d| {
            d.kept && d.value == d.die.max_face() && formula.sign_factor(d.group) > 0
        })
        .map(|d| (d.group, d.die))
        .collect();

    for (group, die) in &triggers {
        dice.push(DieResult {
            die: *die,
            value: source.draw(die.sides()),
            group: *group,
            kept: true,
        });
    }

    triggers.len() as u32
}
