//! H1 bars of an exported walk
//!
//! Reads `points.csv` (as written by `collatz_ant`) and prints every H1
//! persistence bar of its `(x, y)` cloud. A missing or malformed input file
//! aborts the run.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use collatz_ant_tda::{telemetry, HomologyOracle, PathLog, RipsConfig, RipsOracle};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the H1 persistence bars of a path CSV")]
struct Args {
    /// Path CSV produced by collatz_ant
    #[arg(long, default_value = "points.csv")]
    input: PathBuf,

    /// Largest Vietoris-Rips edge length
    #[arg(long)]
    max_epsilon: Option<f64>,
}

fn main() -> Result<()> {
    telemetry::init();
    let args = Args::parse();

    let rips = RipsConfig {
        max_epsilon: args.max_epsilon,
    };
    rips.validate()?;

    let file = File::open(&args.input)
        .with_context(|| format!("input file not found: {}", args.input.display()))?;
    let path = PathLog::read_csv(BufReader::new(file))
        .with_context(|| format!("reading {}", args.input.display()))?;

    let bars = RipsOracle::new(&rips)
        .compute(&path.point_cloud())
        .context("computing H1 persistence")?;

    println!("H1 bars:");
    for bar in &bars {
        println!(
            "birth={:.3}, death={:.3}, length={:.3}",
            bar.birth,
            bar.death,
            bar.persistence()
        );
    }
    tracing::info!(points = path.len(), bars = bars.len(), "done");

    Ok(())
}
