//! H1 summary statistics of a trace
//!
//! Only bars with a finite death enter the statistics: an unbounded loop
//! has no comparable lifetime across seeds.

use ndarray::Array2;

use crate::error::Result;
use crate::topology::{HomologyBar, HomologyOracle};

/// Below this many points no loop can form and the oracle is not called
pub const MIN_LOOP_POINTS: usize = 3;

/// Max / mean lifetime and count of finite H1 bars
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct H1Metrics {
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

impl H1Metrics {
    /// Reduce a diagram, discarding essential bars
    pub fn from_bars(bars: &[HomologyBar]) -> Self {
        let lifetimes: Vec<f64> = bars
            .iter()
            .filter(|bar| !bar.is_essential())
            .map(HomologyBar::persistence)
            .collect();

        if lifetimes.is_empty() {
            return Self::default();
        }

        let max = lifetimes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg = lifetimes.iter().sum::<f64>() / lifetimes.len() as f64;

        Self {
            max,
            avg,
            count: lifetimes.len(),
        }
    }

    /// Ask `oracle` for the H1 bars of `points` and reduce them
    ///
    /// Clouds with fewer than [`MIN_LOOP_POINTS`] rows give zero metrics
    /// without consulting the oracle. Oracle errors propagate.
    pub fn measure<O: HomologyOracle + ?Sized>(oracle: &O, points: &Array2<f64>) -> Result<Self> {
        if points.nrows() < MIN_LOOP_POINTS {
            return Ok(Self::default());
        }
        let bars = oracle.compute(points)?;
        Ok(Self::from_bars(&bars))
    }
}
