//! # De-identification CLI
//!
//! Command-line access to the de-identification engine: read a FHIR
//! resource JSON file, load and compile a rule configuration, and write
//! the de-identified document.
//!
//! ## Command Line Options
//!
//! ```text
//! -r, --resource <RESOURCE>   Path to FHIR resource JSON file ('-' for stdin)
//!     --rules <RULES>         Path to rule configuration JSON file
//! -o, --output <OUTPUT>       Output file path (defaults to stdout)
//!     --pretty                Pretty-print the output JSON
//! -h, --help                  Print help
//! ```
//!
//! ## Usage Examples
//!
//! ```bash
//! deid-cli -r patient.json --rules deid-rules.json
//! cat patient.json | deid-cli -r - --rules deid-rules.json -o out.json
//! ```
//!
//! Logging goes through `tracing` and honors `RUST_LOG`
//! (e.g. `RUST_LOG=vela_deid=debug`).

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::config::DeidConfig;
use crate::engine::DeidentificationEngine;
use crate::error::DeidResult;

#[derive(Parser, Debug)]
#[command(name = "deid-cli")]
#[command(about = "De-identify FHIR resources with a declarative rule set")]
pub struct Args {
    /// Path to FHIR resource JSON file (use '-' for stdin)
    #[arg(short, long)]
    pub resource: PathBuf,

    /// Path to rule configuration JSON file
    #[arg(long)]
    pub rules: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Main CLI execution function
pub fn run_cli(args: Args) -> DeidResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let rules = DeidConfig::from_path(&args.rules)?.compile()?;
    tracing::info!(rules = rules.len(), "compiled rule set");

    let content = read_input(&args.resource)?;
    let mut document: Value = serde_json::from_str(&content)?;

    let engine = DeidentificationEngine::new(rules);
    engine.deidentify(&mut document);

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    write_output(args.output.as_ref(), &rendered)?;
    Ok(())
}

/// Read input from a file or stdin (when the path is '-')
fn read_input(path: &PathBuf) -> DeidResult<String> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: Option<&PathBuf>, rendered: &str) -> DeidResult<()> {
    match path {
        Some(path) => fs::write(path, rendered)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
