use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::grid::GridIndex;
use crate::kernel;

/// Below this separation a neighbor has no defined direction and
/// contributes no gradient.
pub const GRADIENT_MIN_DISTANCE: f32 = 1e-6;

/// `offset / distance`, or zero when `distance <= floor`.
#[inline]
pub(crate) fn unit_or_zero(offset: Vec2, distance: f32, floor: f32) -> Vec2 {
    if distance > floor {
        offset / distance
    } else {
        Vec2::ZERO
    }
}

/// SPH density at `sample` from the given neighbor positions.
///
/// `rho = sum_j { m * W(|x - x_j|, h) }`. Include the sample's own position
/// in `neighbor_positions` to get its self contribution.
pub fn density(sample: Vec2, neighbor_positions: &[Vec2], mass: f32, radius: f32) -> f32 {
    neighbor_positions
        .iter()
        .map(|&p| mass * kernel::weight(radius, sample.distance(p)))
        .sum()
}

/// Spatial gradient of the density field at `sample`.
///
/// `grad rho = sum_j { m * W'(d_j, h) * (x - x_j) / d_j }`. Coincident
/// neighbors, the sample itself included, contribute nothing.
pub fn density_gradient(
    sample: Vec2,
    neighbor_positions: &[Vec2],
    mass: f32,
    radius: f32,
) -> Vec2 {
    let mut gradient = Vec2::ZERO;
    for &p in neighbor_positions {
        let offset = sample - p;
        let d = offset.length();
        let slope = kernel::gradient_magnitude(radius, d);
        gradient += mass * slope * unit_or_zero(offset, d, GRADIENT_MIN_DISTANCE);
    }
    gradient
}

/// Density of every particle in the snapshot, using `grid` for neighbors.
///
/// `grid` must have been rebuilt from `positions`.
pub fn compute_densities(positions: &[Vec2], grid: &GridIndex, mass: f32, radius: f32) -> Vec<f32> {
    let density_at = |i: usize| {
        let sample = positions[i];
        let mut rho = 0.0_f32;
        grid.for_each_neighbor(sample, positions, radius, |j| {
            rho += mass * kernel::weight(radius, sample.distance(positions[j as usize]));
        });
        rho
    };

    #[cfg(feature = "parallel")]
    let densities: Vec<f32> = (0..positions.len()).into_par_iter().map(density_at).collect();
    #[cfg(not(feature = "parallel"))]
    let densities: Vec<f32> = (0..positions.len()).map(density_at).collect();

    densities
}

/// Density gradient of every particle in the snapshot.
pub fn compute_density_gradients(
    positions: &[Vec2],
    grid: &GridIndex,
    mass: f32,
    radius: f32,
) -> Vec<Vec2> {
    let gradient_at = |i: usize| {
        let sample = positions[i];
        let mut gradient = Vec2::ZERO;
        grid.for_each_neighbor(sample, positions, radius, |j| {
            let offset = sample - positions[j as usize];
            let d = offset.length();
            let slope = kernel::gradient_magnitude(radius, d);
            gradient += mass * slope * unit_or_zero(offset, d, GRADIENT_MIN_DISTANCE);
        });
        gradient
    };

    #[cfg(feature = "parallel")]
    let gradients: Vec<Vec2> = (0..positions.len()).into_par_iter().map(gradient_at).collect();
    #[cfg(not(feature = "parallel"))]
    let gradients: Vec<Vec2> = (0..positions.len()).map(gradient_at).collect();

    gradients
}
