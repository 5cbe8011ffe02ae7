use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cornerspacing::{DEFAULT_DBU_PER_MICRON, DbuScale, TechLayer, parse_clause};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Clause to read; otherwise one clause per line from FILE or stdin
    #[arg(value_name = "CLAUSE")]
    clause: Option<String>,

    /// Read clauses from a file
    #[arg(short = 'i', long, value_name = "FILE", conflicts_with = "clause")]
    input: Option<String>,

    /// Database units per micron
    #[arg(short = 'd', long, default_value_t = DEFAULT_DBU_PER_MICRON)]
    dbu_per_micron: f64,

    /// Name of the layer the rules belong to
    #[arg(short = 'l', long, default_value = "metal1")]
    layer: String,
}

/// Install a subscriber only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_clauses(args: &Args) -> Result<Vec<String>> {
    if let Some(clause) = &args.clause {
        return Ok(vec![clause.clone()]);
    }
    let text = if let Some(path) = &args.input {
        fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
    } else {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    };
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

fn run(args: &Args) -> Result<bool> {
    let scale = DbuScale::new(args.dbu_per_micron)?;
    let clauses = read_clauses(args)?;
    let mut layer = TechLayer::new(args.layer.as_str());
    let mut all_ok = true;

    for (index, text) in clauses.iter().enumerate() {
        match parse_clause(text, &scale) {
            Ok(rule) => {
                println!("{}", rule.to_lef(&scale));
                layer.add_corner_spacing_rule(rule);
            }
            Err(err) => {
                eprintln!("error: clause {}: {}", index + 1, err);
                all_ok = false;
            }
        }
    }

    let count = layer.corner_spacing_rules().len();
    println!(
        "{} holds {} corner spacing rule{}.",
        layer.name(),
        count,
        if count == 1 { "" } else { "s" }
    );
    Ok(all_ok)
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
