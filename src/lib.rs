//! # Collatz-Ant-TDA
//!
//! Topology of Collatz Walks: a deterministic lattice ant driven by the
//! Collatz map, summarised with 1-dimensional persistent homology.
//!
//! ## The Walk
//!
//! An ant starts at the origin facing up, carrying a seed N. While N ≠ 1 it
//! turns right on even N (N ← N/2) or left on odd N (N ← 3N+1), then steps
//! one cell forward. Stepping onto a cell it has already visited raises a
//! global height counter.
//!
//! ## Methodology
//!
//! 1. **Trace**: every transition is recorded as `(x, y, h, N)`
//! 2. **Sequence statistics**: stopping time, peak value, odd runs, ...
//! 3. **Persistent Homology (H1)**: the `(x, y)` trace is a point cloud whose
//!    Vietoris-Rips loops are measured by their lifetimes
//! 4. **Summary**: one row per seed, in ascending seed order
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Lagarias, "The 3x+1 Problem and its Generalizations" (1985)

pub mod ant;
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;
pub mod topology;

pub use error::{Error, Result};

// Re-exports from ant
pub use ant::{AntSimulator, Orientation, PathEntry, PathLog, PATH_CSV_HEADER};

// Re-exports from topology
pub use topology::{
    compute_h1_persistence,
    FilteredEdge,
    HomologyBar,
    HomologyOracle,
    RipsOracle,
    VietorisRips,
};

// Re-exports from metrics
pub use metrics::{
    H1Metrics,
    MetricsPipeline,
    SequenceStats,
    SummaryRow,
    SummaryTable,
    MIN_LOOP_POINTS,
    SUMMARY_CSV_HEADER,
};

// Re-exports from config
pub use config::{AppConfig, OutputConfig, PipelineConfig, RipsConfig, WalkConfig};
