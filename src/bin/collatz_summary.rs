//! Collatz Ant Summary: H1 + Sequence Metrics over a Seed Range
//!
//! ## Protocol
//!
//! 1. Load `collatz.toml` (or defaults), apply command-line overrides
//! 2. Run the ant for every seed in the range with a fresh simulator
//! 3. Compute Vietoris-Rips H1 metrics on each `(x, y)` trace
//! 4. Write one summary row per seed, in seed order

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use collatz_ant_tda::{telemetry, AppConfig, MetricsPipeline, RipsOracle};

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarise Collatz ant walks over a seed range")]
struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "collatz.toml")]
    config: PathBuf,

    /// First seed (inclusive)
    #[arg(long)]
    seed_min: Option<u64>,

    /// Last seed (inclusive)
    #[arg(long)]
    seed_max: Option<u64>,

    /// Maximum transitions per seed
    #[arg(long)]
    steps: Option<usize>,

    /// Summary CSV output path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Process seeds on all cores (row order is unchanged)
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Largest Vietoris-Rips edge length
    #[arg(long)]
    max_epsilon: Option<f64>,
}

fn main() -> Result<()> {
    telemetry::init();
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed_min) = args.seed_min {
        config.pipeline.seed_min = seed_min;
    }
    if let Some(seed_max) = args.seed_max {
        config.pipeline.seed_max = seed_max;
    }
    if let Some(steps) = args.steps {
        config.pipeline.steps = steps;
    }
    if let Some(out) = args.out {
        config.output.summary_path = out;
    }
    if args.parallel {
        config.pipeline.parallel = true;
    }
    if args.max_epsilon.is_some() {
        config.rips.max_epsilon = args.max_epsilon;
    }
    config.validate().context("invalid configuration")?;

    tracing::info!(
        seed_min = config.pipeline.seed_min,
        seed_max = config.pipeline.seed_max,
        steps = config.pipeline.steps,
        parallel = config.pipeline.parallel,
        max_epsilon = ?config.rips.max_epsilon,
        "starting summary run"
    );

    let started = Instant::now();
    let pipeline = MetricsPipeline::new(RipsOracle::new(&config.rips))
        .with_parallel(config.pipeline.parallel);
    let table = pipeline
        .run_config(&config.pipeline)
        .context("summary pipeline aborted")?;

    let path = &config.output.summary_path;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    table
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;

    tracing::info!(
        "Wrote {} (processed {} seeds in {:.1}s)",
        path.display(),
        table.len(),
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
