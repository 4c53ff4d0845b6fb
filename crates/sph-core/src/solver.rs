use glam::Vec2;

use crate::config::FluidConfig;
use crate::density::compute_densities;
use crate::error::SphError;
use crate::grid::GridIndex;
use crate::particle::ParticleSet;
use crate::pressure::compute_pressure_forces;

/// Per-tick driver for the fluid core.
///
/// Holds the tunables and the grid of the last tick. It never integrates:
/// forces are handed back to the caller, who applies them once every
/// particle's force has been computed.
pub struct FluidSolver {
    config: FluidConfig,
    grid: Option<GridIndex>,
}

impl FluidSolver {
    pub fn new(config: FluidConfig) -> Result<Self, SphError> {
        config.validate()?;
        log::debug!(
            "fluid solver: h={} mass={} rest_density={} stiffness={}",
            config.smoothing_radius,
            config.mass,
            config.rest_density,
            config.stiffness
        );
        Ok(Self { config, grid: None })
    }

    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Replace the tunables. An invalid config is rejected and the old one
    /// kept. On success the cached grid is dropped, since it may have been
    /// built for another radius.
    pub fn set_config(&mut self, config: FluidConfig) -> Result<(), SphError> {
        config.validate()?;
        self.config = config;
        self.grid = None;
        Ok(())
    }

    /// Rebuild the grid, refresh `particles.density`, and return the
    /// pressure force on every particle.
    ///
    /// Positions and velocities are left untouched. On error no grid is
    /// cached.
    pub fn compute_forces(&mut self, particles: &mut ParticleSet) -> Result<Vec<Vec2>, SphError> {
        self.grid = None;
        let h = self.config.smoothing_radius;
        let mass = self.config.mass;
        let grid = GridIndex::rebuild(&particles.position, h)?;

        // Phase 1: every density from the old positions.
        particles.density = compute_densities(&particles.position, &grid, mass, h);

        // Phase 2: every force from those densities.
        let forces = compute_pressure_forces(
            &particles.position,
            &particles.density,
            &grid,
            mass,
            h,
            &self.config,
        );

        self.grid = Some(grid);
        Ok(forces)
    }

    /// Grid built by the last successful [`FluidSolver::compute_forces`] call.
    pub fn grid(&self) -> Option<&GridIndex> {
        self.grid.as_ref()
    }
}

/// Add `gravity * dt` to every velocity.
pub fn apply_gravity(velocities: &mut [Vec2], gravity: Vec2, dt: f32) {
    let dv = gravity * dt;
    for v in velocities.iter_mut() {
        *v += dv;
    }
}
