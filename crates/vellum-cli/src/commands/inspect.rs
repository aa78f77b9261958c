use comfy_table::{ContentArrangement, Table};
use vellum_dice::{Formula, Sign, Term};

pub fn run(formula: &str) -> Result<(), String> {
    let parsed = Formula::parse(formula).map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Term", "Detail"]);

    for (index, term) in parsed.terms().iter().enumerate() {
        let (kind, detail) = match term {
            Term::Dice { count, die, sign } => (
                "dice".to_string(),
                format!(
                    "{}{count}{die}",
                    if *sign == Sign::Minus { "-" } else { "" }
                ),
            ),
            Term::Modifier(value) => ("modifier".to_string(), format!("{value:+}")),
        };
        table.add_row(vec![index.to_string(), kind, detail]);
    }
    println!("{table}");

    println!("  Canonical: {}", parsed.canonical());
    println!("  Flat modifier: {:+}", parsed.flat_modifier());

    Ok(())
}
