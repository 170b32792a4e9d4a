//! Homology oracle seam
//!
//! The metrics pipeline only needs "point cloud in, H1 bars out". Anything
//! that can answer that (the built-in [`RipsOracle`](super::RipsOracle), or a
//! fixed table in tests) implements [`HomologyOracle`].

use ndarray::Array2;

use crate::error::Result;

/// A 1-dimensional persistence bar [birth, death)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomologyBar {
    pub birth: f64,
    /// `f64::INFINITY` for loops that never close within the filtration
    pub death: f64,
}

impl HomologyBar {
    pub fn new(birth: f64, death: f64) -> Self {
        Self { birth, death }
    }

    /// Lifetime of the loop
    pub fn persistence(&self) -> f64 {
        if self.death.is_infinite() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Source of H1 persistence for a finite 2D point cloud
///
/// Implementations must be deterministic for a fixed cloud. `Sync` lets the
/// pipeline share one oracle across worker threads.
pub trait HomologyOracle: Sync {
    /// H1 bars of the cloud given as an n × 2 array
    fn compute(&self, points: &Array2<f64>) -> Result<Vec<HomologyBar>>;
}

impl<T: HomologyOracle + ?Sized> HomologyOracle for &T {
    fn compute(&self, points: &Array2<f64>) -> Result<Vec<HomologyBar>> {
        (**self).compute(points)
    }
}
