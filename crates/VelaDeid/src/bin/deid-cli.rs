//! De-identification CLI executable
//!
//! Thin shell over the cli module; see its documentation for usage.

use clap::Parser;
use vela_deid::cli::{Args, run_cli};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run_cli(args)?;
    Ok(())
}
