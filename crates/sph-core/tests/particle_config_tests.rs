use glam::Vec2;
use sph_core::config::FluidConfig;
use sph_core::error::SphError;
use sph_core::particle::ParticleSet;

#[test]
fn test_particle_set_new_initializes_correctly() {
    let particles = ParticleSet::new(10);

    assert_eq!(particles.count, 10);

    for i in 0..10 {
        assert_eq!(particles.position[i], Vec2::ZERO, "position[{i}] should be ZERO");
        assert_eq!(particles.velocity[i], Vec2::ZERO, "velocity[{i}] should be ZERO");
        assert_eq!(particles.density[i], 0.0, "density[{i}] should be 0.0");
    }
}

#[test]
fn test_particle_set_zero_count() {
    let particles = ParticleSet::new(0);

    assert_eq!(particles.count, 0);
    assert_eq!(particles.position.len(), 0);
    assert_eq!(particles.velocity.len(), 0);
    assert_eq!(particles.density.len(), 0);
}

#[test]
fn test_particle_set_from_positions_and_push() {
    let positions = [Vec2::new(1.0, 2.0), Vec2::new(-3.0, 0.5)];
    let mut particles = ParticleSet::from_positions(&positions);
    assert_eq!(particles.count, 2);
    assert_eq!(particles.position[1], Vec2::new(-3.0, 0.5));

    let idx = particles.push(Vec2::new(4.0, 4.0), Vec2::new(0.0, -1.0));
    assert_eq!(idx, 2);
    assert_eq!(particles.count, 3);
    assert_eq!(particles.position.len(), 3);
    assert_eq!(particles.velocity[2], Vec2::new(0.0, -1.0));
    assert_eq!(particles.density[2], 0.0);
}

#[test]
fn test_config_default_values() {
    let config = FluidConfig::default();

    assert_eq!(config.smoothing_radius, 1.0);
    assert_eq!(config.mass, 20.0);
    assert_eq!(config.rest_density, 1.0);
    assert_eq!(config.stiffness, 10.0);
    assert_eq!(config.gravity, Vec2::new(0.0, -10.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let bad_radius = FluidConfig {
        smoothing_radius: 0.0,
        ..FluidConfig::default()
    };
    assert_eq!(bad_radius.validate(), Err(SphError::InvalidRadius(0.0)));

    let infinite_radius = FluidConfig {
        smoothing_radius: f32::INFINITY,
        ..FluidConfig::default()
    };
    assert!(infinite_radius.validate().is_err());

    let bad_mass = FluidConfig {
        mass: -1.0,
        ..FluidConfig::default()
    };
    assert!(matches!(bad_mass.validate(), Err(SphError::InvalidConfig(_))));

    let bad_stiffness = FluidConfig {
        stiffness: f32::NAN,
        ..FluidConfig::default()
    };
    assert!(matches!(bad_stiffness.validate(), Err(SphError::InvalidConfig(_))));

    let bad_gravity = FluidConfig {
        gravity: Vec2::new(0.0, f32::INFINITY),
        ..FluidConfig::default()
    };
    assert!(bad_gravity.validate().is_err());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        SphError::InvalidRadius(-2.0).to_string(),
        "smoothing radius must be positive and finite, got -2"
    );
    assert_eq!(SphError::InvalidTableSize.to_string(), "grid table size must be non-zero");
    assert!(SphError::InvalidConfig("mass must be positive and finite")
        .to_string()
        .contains("mass"));
}
