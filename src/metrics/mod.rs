//! Metrics Module: Per-Seed Statistics and the Summary Table
//!
//! - `sequence.rs`: Collatz sequence statistics (stopping time, odd runs, ...)
//! - `h1.rs`: finite-bar H1 statistics via a [`HomologyOracle`](crate::HomologyOracle)
//! - `pipeline.rs`: the seed-range batch runner
//! - `summary.rs`: summary rows and their CSV form

mod h1;
mod pipeline;
mod sequence;
mod summary;

pub use h1::{H1Metrics, MIN_LOOP_POINTS};
pub use pipeline::MetricsPipeline;
pub use sequence::SequenceStats;
pub use summary::{SummaryRow, SummaryTable, SUMMARY_CSV_HEADER};
