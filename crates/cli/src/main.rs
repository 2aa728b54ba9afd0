#![deny(unsafe_code)]
//! CLI binary for rngtrace sequence tracing and spawn prediction.
//!
//! Subcommands:
//! - `gen <seed>` — print generator outputs, forwards or backwards
//! - `select <weights> <seed>` — resolve a slot list and roll one selection
//! - `predict <weights> <seed>` — advances until a target shiny spawn

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use rngtrace_core::{spawn, State, WeightTable, Xorshift128};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rngtrace", about = "Unity Xorshift128 tracing and prediction")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print generator outputs from a seed.
    Gen {
        /// Four seed words as hex, in memory order (s0 s1 s2 s3).
        #[arg(num_args = 4, required = true, value_names = ["S0", "S1", "S2", "S3"])]
        seed: Vec<String>,

        /// Number of outputs to print.
        #[arg(short, long, default_value_t = 10)]
        count: u64,

        /// Step the generator backwards instead of forwards.
        #[arg(long)]
        reverse: bool,
    },
    /// Resolve a weighted slot list and roll one selection.
    Select {
        /// Path to the weights JSON file.
        weights: PathBuf,

        /// Four seed words as hex, in memory order (s0 s1 s2 s3).
        #[arg(num_args = 4, required = true, value_names = ["S0", "S1", "S2", "S3"])]
        seed: Vec<String>,

        /// Rarity key (first table level).
        #[arg(long)]
        rarity: String,

        /// Type key (second table level).
        #[arg(long = "type")]
        kind: String,

        /// Secondary type key (optional third table level).
        #[arg(long = "type2")]
        secondary: Option<String>,
    },
    /// Search for the number of advances until a target shiny spawn.
    Predict {
        /// Path to the weights JSON file.
        weights: PathBuf,

        /// Four seed words as hex, in memory order (s0 s1 s2 s3).
        #[arg(num_args = 4, required = true, value_names = ["S0", "S1", "S2", "S3"])]
        seed: Vec<String>,

        /// Rarity key (first table level).
        #[arg(long)]
        rarity: String,

        /// Type key (second table level).
        #[arg(long = "type")]
        kind: String,

        /// Secondary type key (optional third table level).
        #[arg(long = "type2")]
        secondary: Option<String>,

        /// Target species key in the weights table.
        #[arg(long)]
        target: String,

        /// Advances already consumed; its parity gates which frames the
        /// spawn routine can sample.
        #[arg(long, default_value_t = 0)]
        advances: u64,

        /// Give up after probing this many further advances.
        #[arg(long, default_value_t = spawn::DEFAULT_SEARCH_CAP)]
        cap: u64,
    },
}

fn parse_seed(words: &[String]) -> Result<State, CliError> {
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    Ok(State::from_hex_words(&words)?)
}

fn load_table(path: &PathBuf) -> Result<WeightTable, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    Ok(WeightTable::from_json(&text)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Gen {
            seed,
            count,
            reverse,
        } => {
            let mut rng = Xorshift128::new(parse_seed(&seed)?);
            let mut lines = Vec::with_capacity(count as usize);
            for index in 0..count {
                let value = if reverse { rng.previous() } else { rng.next() };
                lines.push((index, value, rng.state()));
            }

            if cli.json {
                let entries: Vec<_> = lines
                    .iter()
                    .map(|(index, value, state)| {
                        serde_json::json!({
                            "index": index,
                            "value": value,
                            "state": state,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for (index, value, state) in lines {
                    println!("{index:>6}  {value:08X}  [{state}]");
                }
            }
        }
        Command::Select {
            weights,
            seed,
            rarity,
            kind,
            secondary,
        } => {
            let table = load_table(&weights)?;
            let slots = table.slots(&rarity, &kind, secondary.as_deref())?;
            let mut rng = Xorshift128::new(parse_seed(&seed)?);
            let chosen = slots.roll(&mut rng)?.to_owned();

            if cli.json {
                let info = serde_json::json!({
                    "category": chosen,
                    "total_weight": slots.total(),
                    "slot_count": slots.len(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "selected {chosen} ({} slots, total weight {})",
                    slots.len(),
                    slots.total()
                );
            }
        }
        Command::Predict {
            weights,
            seed,
            rarity,
            kind,
            secondary,
            target,
            advances,
            cap,
        } => {
            let table = load_table(&weights)?;
            let slots = table.slots(&rarity, &kind, secondary.as_deref())?;
            let rng = Xorshift128::new(parse_seed(&seed)?);
            let prediction = spawn::advances_until(&rng, &slots, &target, advances, cap)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                let s = &prediction.spawn;
                println!("advances until target: {}", prediction.advances);
                println!(
                    "species {} pid {:08X} sidtid {:08X} shiny {}",
                    s.species, s.pid, s.sidtid, s.shiny
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
