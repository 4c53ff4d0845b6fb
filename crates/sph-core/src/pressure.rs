use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::FluidConfig;
use crate::density::unit_or_zero;
use crate::grid::GridIndex;
use crate::kernel;

/// Neighbors closer than this are treated as coincident and skipped.
pub const PRESSURE_MIN_DISTANCE: f32 = 1e-5;

/// Neighbors with a density at or below this are skipped to avoid dividing
/// by (almost) zero.
pub const PRESSURE_MIN_DENSITY: f32 = 1e-5;

/// Linear equation of state: `p = (rho - rho_0) * k`.
#[inline]
pub fn density_to_pressure(density: f32, config: &FluidConfig) -> f32 {
    (density - config.rest_density) * config.stiffness
}

/// Mean pressure of a particle pair.
///
/// Symmetric in its arguments, so the force of A on B mirrors the force of
/// B on A.
#[inline]
pub fn shared_pressure(density_a: f32, density_b: f32, config: &FluidConfig) -> f32 {
    (density_to_pressure(density_a, config) + density_to_pressure(density_b, config)) / 2.0
}

/// Contribution of a single neighbor to the pressure force on the sample.
#[inline]
fn pressure_term(
    sample: Vec2,
    sample_density: f32,
    neighbor: Vec2,
    neighbor_density: f32,
    mass: f32,
    radius: f32,
    config: &FluidConfig,
) -> Vec2 {
    let offset = sample - neighbor;
    let d = offset.length();
    if d <= PRESSURE_MIN_DISTANCE || neighbor_density <= PRESSURE_MIN_DENSITY {
        return Vec2::ZERO;
    }
    let slope = kernel::gradient_magnitude(radius, d);
    let pressure = shared_pressure(neighbor_density, sample_density, config);
    pressure * mass * slope * unit_or_zero(offset, d, PRESSURE_MIN_DISTANCE) / neighbor_density
}

/// Pressure force on a particle at `sample` from its neighbors.
///
/// `f = sum_j { P_ij * m * W'(d_j, h) * (x - x_j) / d_j / rho_j }` with
/// `P_ij` the [`shared_pressure`]. Coincident neighbors and neighbors with
/// near-zero density are skipped, so the sample itself may be passed in.
///
/// `neighbor_positions` and `neighbor_densities` are parallel slices.
pub fn pressure_force(
    sample: Vec2,
    sample_density: f32,
    neighbor_positions: &[Vec2],
    neighbor_densities: &[f32],
    mass: f32,
    radius: f32,
    config: &FluidConfig,
) -> Vec2 {
    debug_assert_eq!(neighbor_positions.len(), neighbor_densities.len());
    neighbor_positions
        .iter()
        .zip(neighbor_densities)
        .map(|(&p, &rho_j)| pressure_term(sample, sample_density, p, rho_j, mass, radius, config))
        .fold(Vec2::ZERO, |acc, f| acc + f)
}

/// Pressure force on every particle in the snapshot.
///
/// `densities` must already hold this tick's densities for `positions`, and
/// `grid` must have been rebuilt from `positions`.
pub fn compute_pressure_forces(
    positions: &[Vec2],
    densities: &[f32],
    grid: &GridIndex,
    mass: f32,
    radius: f32,
    config: &FluidConfig,
) -> Vec<Vec2> {
    debug_assert_eq!(positions.len(), densities.len());

    let force_at = |i: usize| {
        let sample = positions[i];
        let rho_i = densities[i];
        let mut force = Vec2::ZERO;
        grid.for_each_neighbor(sample, positions, radius, |j| {
            let j = j as usize;
            force += pressure_term(sample, rho_i, positions[j], densities[j], mass, radius, config);
        });
        force
    };

    #[cfg(feature = "parallel")]
    let forces: Vec<Vec2> = (0..positions.len()).into_par_iter().map(force_at).collect();
    #[cfg(not(feature = "parallel"))]
    let forces: Vec<Vec2> = (0..positions.len()).map(force_at).collect();

    forces
}
