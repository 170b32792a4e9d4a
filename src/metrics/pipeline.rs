//! Metrics pipeline: seed range → summary table
//!
//! ## Protocol
//!
//! For every seed in `seed_min..=seed_max`:
//! 1. Run a fresh [`AntSimulator`] for at most `steps` transitions
//! 2. Derive the height maximum and the Collatz sequence statistics
//! 3. Hand the `(x, y)` trace to the homology oracle for H1 metrics
//! 4. Emit one [`SummaryRow`]
//!
//! Rows always come back in ascending seed order, in parallel mode too.
//! An oracle failure aborts the whole batch.

use std::time::Instant;

use rayon::prelude::*;

use super::h1::H1Metrics;
use super::sequence::SequenceStats;
use super::summary::{SummaryRow, SummaryTable};
use crate::ant::AntSimulator;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::topology::HomologyOracle;

/// Batch runner over a seed range
#[derive(Debug, Clone)]
pub struct MetricsPipeline<O> {
    oracle: O,
    /// Fan seeds out over the rayon pool
    parallel: bool,
}

impl<O: HomologyOracle> MetricsPipeline<O> {
    /// Sequential pipeline around `oracle`
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// One row per seed in `seed_min..=seed_max`, ascending
    ///
    /// # Errors
    /// * [`Error::InvalidRange`] if `seed_min` is 0 or exceeds `seed_max`
    /// * the first oracle or simulator error encountered
    pub fn run(&self, seed_min: u64, seed_max: u64, steps: usize) -> Result<Vec<SummaryRow>> {
        if seed_min == 0 || seed_min > seed_max {
            return Err(Error::InvalidRange {
                min: seed_min,
                max: seed_max,
            });
        }

        let started = Instant::now();
        let seeds: Vec<u64> = (seed_min..=seed_max).collect();
        let total = seeds.len();

        let rows = if self.parallel {
            seeds
                .par_iter()
                .enumerate()
                .map(|(i, &seed)| self.summarize_logged(i + 1, total, seed, steps))
                .collect::<Result<Vec<_>>>()?
        } else {
            seeds
                .iter()
                .enumerate()
                .map(|(i, &seed)| self.summarize_logged(i + 1, total, seed, steps))
                .collect::<Result<Vec<_>>>()?
        };

        tracing::info!(
            seeds = total,
            elapsed_s = started.elapsed().as_secs_f64(),
            parallel = self.parallel,
            "pipeline finished"
        );

        Ok(rows)
    }

    /// Run the range described by `config` into a table
    pub fn run_config(&self, config: &PipelineConfig) -> Result<SummaryTable> {
        config.validate()?;
        self.run(config.seed_min, config.seed_max, config.steps)
            .map(SummaryTable::from)
    }

    /// Simulate one seed and reduce its trace to a row
    pub fn summarize_seed(&self, seed: u64, steps: usize) -> Result<SummaryRow> {
        let mut ant = AntSimulator::new(seed)?;
        ant.run(steps)?;
        if !ant.is_finished() {
            tracing::warn!(seed, steps, "walk did not reach 1 within the step bound");
        }
        let path = ant.into_path();

        let stats = SequenceStats::from_values(seed, &path.values());
        let h1 = H1Metrics::measure(&self.oracle, &path.point_cloud())?;

        Ok(SummaryRow::new(seed, h1, path.height_max(), stats))
    }

    fn summarize_logged(
        &self,
        index: usize,
        total: usize,
        seed: u64,
        steps: usize,
    ) -> Result<SummaryRow> {
        let t0 = Instant::now();
        let row = self.summarize_seed(seed, steps)?;

        tracing::info!(
            "[{index}/{total}] Seed={seed}  points={}  H1_count={}  H1_max={:.6}  height_max={}  time={:.2}s",
            row.total_steps + 1,
            row.h1_count,
            row.h1_max,
            row.height_max,
            t0.elapsed().as_secs_f64()
        );

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{HomologyBar, RipsOracle};
    use ndarray::Array2;

    /// Oracle that fails on clouds of a given size
    struct FailOn(usize);

    impl HomologyOracle for FailOn {
        fn compute(&self, points: &Array2<f64>) -> Result<Vec<HomologyBar>> {
            if points.nrows() == self.0 {
                Err(Error::oracle("injected failure"))
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[test]
    fn test_rows_follow_seed_order() {
        let pipeline = MetricsPipeline::new(RipsOracle::default());
        let rows = pipeline.run(3, 12, 1_000).unwrap();
        let seeds: Vec<u64> = rows.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, (3..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_seed_one_row() {
        let pipeline = MetricsPipeline::new(RipsOracle::default());
        let row = pipeline.summarize_seed(1, 100).unwrap();
        assert_eq!(row.total_steps, 0);
        assert_eq!(row.odd_steps, 1);
        assert_eq!(row.max_consecutive_odds, 1);
        assert_eq!(row.h1_count, 0);
        assert_eq!(row.h1_max, 0.0);
        assert_eq!(row.stopping_time, None);
    }

    #[test]
    fn test_seed_two_row() {
        let pipeline = MetricsPipeline::new(RipsOracle::default());
        let row = pipeline.summarize_seed(2, 100).unwrap();
        assert_eq!(row.total_steps, 1);
        assert_eq!(row.stopping_time, Some(1));
        assert_eq!(row.max_value, 2);
        assert_eq!(row.peak_ratio, 1.0);
        assert_eq!(row.height_max, 0);
        assert_eq!(row.h1_count, 0);
    }

    #[test]
    fn test_seed_five_row() {
        // the walk traces a unit square: one loop of lifetime sqrt(2) - 1
        let pipeline = MetricsPipeline::new(RipsOracle::default());
        let row = pipeline.summarize_seed(5, 100).unwrap();
        let lifetime = 2.0_f64.sqrt() - 1.0;
        assert_eq!(row.h1_count, 1);
        assert!((row.h1_max - lifetime).abs() < 1e-12);
        assert!((row.h1_avg - lifetime).abs() < 1e-12);
        assert_eq!(row.height_max, 2);
        assert_eq!(row.stopping_time, Some(3));
        assert_eq!(row.sum_of_values, 36.0);
    }

    #[test]
    fn test_step_bound_truncates() {
        let pipeline = MetricsPipeline::new(RipsOracle::default());
        let row = pipeline.summarize_seed(27, 10).unwrap();
        assert_eq!(row.total_steps, 10);
    }

    #[test]
    fn test_invalid_ranges() {
        let pipeline = MetricsPipeline::new(RipsOracle::default());
        assert!(matches!(pipeline.run(0, 5, 10), Err(Error::InvalidRange { .. })));
        assert!(matches!(pipeline.run(6, 5, 10), Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_oracle_failure_aborts_batch() {
        // seed 3 records 8 points
        let pipeline = MetricsPipeline::new(FailOn(8));
        assert!(pipeline.run(1, 10, 1_000).is_err());
        assert!(pipeline.with_parallel(true).run(1, 10, 1_000).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = MetricsPipeline::new(RipsOracle::default());
        let parallel = MetricsPipeline::new(RipsOracle::default()).with_parallel(true);
        assert_eq!(
            sequential.run(1, 40, 500).unwrap(),
            parallel.run(1, 40, 500).unwrap()
        );
    }

    #[test]
    fn test_run_config() {
        let pipeline = MetricsPipeline::new(RipsOracle::default());
        let config = PipelineConfig {
            seed_min: 1,
            seed_max: 4,
            steps: 100,
            parallel: false,
        };
        let table = pipeline.run_config(&config).unwrap();
        assert_eq!(table.len(), 4);
    }
}
