use glam::Vec2;

use crate::error::SphError;

/// Per-simulation fluid tunables.
///
/// Passed explicitly into every entry point that needs it, so independent
/// simulations can run side by side with different settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidConfig {
    /// Kernel support radius `h`, also the grid cell size.
    pub smoothing_radius: f32,
    /// Uniform particle mass.
    pub mass: f32,
    /// Density at which pressure is zero.
    pub rest_density: f32,
    /// Pressure per unit of density error.
    pub stiffness: f32,
    /// Constant body acceleration applied by the integrator.
    pub gravity: Vec2,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            smoothing_radius: 1.0,
            mass: 20.0,
            rest_density: 1.0,
            stiffness: 10.0,
            gravity: Vec2::new(0.0, -10.0),
        }
    }
}

impl FluidConfig {
    /// Reject settings the kernel and grid cannot work with.
    pub fn validate(&self) -> Result<(), SphError> {
        if !(self.smoothing_radius > 0.0) || !self.smoothing_radius.is_finite() {
            return Err(SphError::InvalidRadius(self.smoothing_radius));
        }
        if !(self.mass > 0.0) || !self.mass.is_finite() {
            return Err(SphError::InvalidConfig("mass must be positive and finite"));
        }
        if !self.rest_density.is_finite() || !self.stiffness.is_finite() {
            return Err(SphError::InvalidConfig(
                "rest_density and stiffness must be finite",
            ));
        }
        if !self.gravity.is_finite() {
            return Err(SphError::InvalidConfig("gravity must be finite"));
        }
        Ok(())
    }
}
