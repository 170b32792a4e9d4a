//! Topology Module: H1 Persistent Homology of Point Clouds
//!
//! For the point cloud X traced by an ant we build the Vietoris-Rips
//! filtration VR_ε(X) and track the birth and death of loops across the
//! scale parameter ε.
//!
//! - `oracle.rs`: the [`HomologyOracle`] seam used by the metrics pipeline
//! - `vietoris_rips.rs`: distinct points, distances, edges in filtration order
//! - `persistence_exact.rs`: exact boundary-matrix reduction (matches Ripser)

mod oracle;
mod persistence_exact;
mod vietoris_rips;

pub use oracle::{HomologyBar, HomologyOracle};
pub use persistence_exact::{compute_h1_persistence, RipsOracle};
pub use vietoris_rips::{FilteredEdge, VietorisRips};
