use glam::Vec2;

/// SoA particle storage.
///
/// Owned by the simulation loop. The fluid core reads `position` and writes
/// `density`; everything else is the integrator's business. Mass is uniform
/// and lives in [`FluidConfig`](crate::config::FluidConfig).
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec2>,
    pub velocity: Vec<Vec2>,
    /// Current SPH density estimate
    pub density: Vec<f32>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec2::ZERO; count],
            velocity: vec![Vec2::ZERO; count],
            density: vec![0.0; count],
        }
    }

    /// Build a set at rest from a list of positions.
    pub fn from_positions(positions: &[Vec2]) -> Self {
        let mut particles = Self::new(positions.len());
        particles.position.copy_from_slice(positions);
        particles
    }

    /// Append a particle and return its index.
    pub fn push(&mut self, position: Vec2, velocity: Vec2) -> usize {
        self.position.push(position);
        self.velocity.push(velocity);
        self.density.push(0.0);
        self.count += 1;
        self.count - 1
    }
}
