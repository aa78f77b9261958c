//! CLI frontend for the Vellum dice engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vellum",
    about = "Vellum — dice roller for the character-sheet companion",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice formula as a custom pool (e.g. "4d8 + 2d4 - 1")
    Roll {
        /// The formula to roll
        formula: String,

        /// RNG seed for a reproducible roll (default: OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of independent rolls (at least 1)
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        times: u32,

        /// Emit the raw result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Perform a d20 check with a modifier and advantage level
    Check {
        /// Flat modifier added to the kept die
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        modifier: i32,

        /// Advantage level: positive keeps highest, negative keeps lowest
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        advantage: i32,

        /// RNG seed for a reproducible roll (default: OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Emit the raw result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Perform an attack: a damage formula with a paired d20 to-hit
    Attack {
        /// The damage formula (e.g. "2d6+3")
        formula: String,

        /// To-hit bonus added to the to-hit d20
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        bonus: i32,

        /// Advantage level applied to the to-hit roll
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        advantage: i32,

        /// RNG seed for a reproducible roll (default: OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Emit the raw result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Parse a formula and show its terms without rolling anything
    Inspect {
        /// The formula to inspect
        formula: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            formula,
            seed,
            times,
            json,
        } => commands::roll::run(&formula, seed, times, json),
        Commands::Check {
            modifier,
            advantage,
            seed,
            json,
        } => commands::check::run(modifier, advantage, seed, json),
        Commands::Attack {
            formula,
            bonus,
            advantage,
            seed,
            json,
        } => commands::attack::run(&formula, bonus, advantage, seed, json),
        Commands::Inspect { formula } => commands::inspect::run(&formula),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
