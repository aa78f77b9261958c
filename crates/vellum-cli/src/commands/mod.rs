pub mod attack;
pub mod check;
pub mod inspect;
pub mod roll;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use vellum_dice::RollResult;

/// Seeded generator when a seed was given, OS entropy otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Serialize a result the way the activity log stores it.
fn print_json(result: &RollResult) -> Result<(), String> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| format!("failed to serialize result: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Render one result: header, per-die table, total and flags.
fn print_result(label: &str, result: &RollResult) {
    println!("  {} {}", label.bold(), result.formula.dimmed());

    if let Some(to_hit) = result.to_hit.as_deref() {
        let outcome = if result.is_fumble {
            "FUMBLE".red().bold()
        } else {
            "to-hit".normal()
        };
        println!(
            "  {} {} {} = {}",
            outcome,
            to_hit.formula.dimmed(),
            format_dice_list(to_hit),
            to_hit.total
        );
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Value", "Kept"]);
    for die in result.all_dice() {
        table.add_row(vec![
            die.die.to_string(),
            die.value.to_string(),
            if die.kept { "yes".to_string() } else { "no".to_string() },
        ]);
    }
    println!("{table}");

    if result.modifier != 0 {
        println!("  Modifier: {:+}", result.modifier);
    }
    println!("  Total: {}", result.total.to_string().bold());

    if result.is_critical_hit {
        println!(
            "  {} ×{}",
            "CRITICAL HIT".green().bold(),
            result.num_criticals
        );
    }
    if result.is_miss {
        println!("  {}", "MISS — no effect".red().bold());
    }
}

/// The kept dice of a roll, with dropped ones in parentheses.
fn format_dice_list(result: &RollResult) -> String {
    let kept: Vec<String> = result.dice.iter().map(|d| d.value.to_string()).collect();
    if result.dropped_dice.is_empty() {
        format!("[{}]", kept.join(", "))
    } else {
        let dropped: Vec<String> = result
            .dropped_dice
            .iter()
            .map(|d| d.value.to_string())
            .collect();
        format!("[{}] (dropped {})", kept.join(", "), dropped.join(", "))
    }
}
