//! Ant Module: Collatz-Driven Lattice Walk
//!
//! Turns a Collatz trajectory into a 2D walk with a global height counter:
//! - `simulator.rs`: the turning/movement state machine
//! - `path.rs`: the recorded trace and its `x,y,h,N` artifact

mod path;
mod simulator;

pub use path::{PathEntry, PathLog, PATH_CSV_HEADER};
pub use simulator::{AntSimulator, Orientation};
