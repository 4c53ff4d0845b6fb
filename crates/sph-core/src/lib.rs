//! 2D SPH fluid core: smoothing kernels, a sorted spatial hash grid for
//! neighbor search, density estimation and symmetric pressure forces.
//!
//! The simulation loop stays outside. Each tick it rebuilds a [`GridIndex`]
//! from the current positions, computes densities and pressure forces from
//! that snapshot, then integrates.

pub mod config;
pub mod density;
pub mod error;
pub mod grid;
pub mod kernel;
pub mod particle;
pub mod pressure;
pub mod solver;

pub use config::FluidConfig;
pub use density::{compute_densities, compute_density_gradients, density, density_gradient};
pub use error::SphError;
pub use grid::{query_exhaustive, GridIndex, LookupEntry};
pub use particle::ParticleSet;
pub use pressure::{compute_pressure_forces, density_to_pressure, pressure_force, shared_pressure};
pub use solver::{apply_gravity, FluidSolver};
