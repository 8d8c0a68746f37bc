//! Core stochastic engine.
//!
//! - Deterministic RNG (PCG with partitioned seeds)
//! - Toroidal SIRS lattice with asynchronous single-cell updates

pub mod lattice;
pub mod rng;

pub use lattice::{CellState, SirsLattice, TransitionProbabilities};
pub use rng::{RandomSource, SimRng};
