//! Collatz Ant: single walk exported as `points.csv`
//!
//! Runs one seed and writes its full trace (`x,y,h,N`) for downstream
//! persistence and plotting tools.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use collatz_ant_tda::{telemetry, AntSimulator, AppConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run one Collatz ant and export its path")]
struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "collatz.toml")]
    config: PathBuf,

    /// Starting value (>= 1)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum transitions
    #[arg(long)]
    steps: Option<usize>,

    /// Path CSV output
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    telemetry::init();
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.walk.seed = seed;
    }
    if let Some(steps) = args.steps {
        config.walk.steps = steps;
    }
    if let Some(out) = args.out {
        config.output.points_path = out;
    }
    config.validate().context("invalid configuration")?;

    let mut ant = AntSimulator::new(config.walk.seed)?;
    ant.run(config.walk.steps)
        .with_context(|| format!("walking seed {}", config.walk.seed))?;
    if !ant.is_finished() {
        tracing::warn!(
            seed = config.walk.seed,
            steps = config.walk.steps,
            "step bound reached before the value hit 1"
        );
    }
    let path = ant.into_path();

    tracing::info!(seed = config.walk.seed, "steps recorded: {}", path.len());
    let tail = &path.entries()[path.len().saturating_sub(10)..];
    for entry in tail {
        tracing::info!(
            "  x={} y={} h={} N={}",
            entry.x,
            entry.y,
            entry.height,
            entry.value
        );
    }

    let out = &config.output.points_path;
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    path.write_csv(BufWriter::new(file))
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!("Wrote {}", out.display());

    Ok(())
}
