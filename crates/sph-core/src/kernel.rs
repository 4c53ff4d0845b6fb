use std::f32::consts::PI;

/// Smoothing kernel for SPH density estimation.
///
/// Returns `W(d, h) = (h - d)^2 / (PI * h^4 / 6)` when `d <= h`,
/// and `0.0` when `d > h`. The normalisation makes the kernel integrate to
/// one over the disc of radius `h`.
#[inline]
pub fn weight(radius: f32, distance: f32) -> f32 {
    if distance > radius {
        return 0.0;
    }
    let volume = PI * radius.powi(4) / 6.0;
    let diff = radius - distance;
    diff * diff / volume
}

/// Slope of [`weight`] with respect to distance.
///
/// Returns `(d - h) * 12 / (PI * h^4)` when `d <= h`, and `0.0` when
/// `d > h`. Never positive; the caller supplies the direction.
#[inline]
pub fn gradient_magnitude(radius: f32, distance: f32) -> f32 {
    if distance > radius {
        return 0.0;
    }
    let scale = 12.0 / (PI * radius.powi(4));
    (distance - radius) * scale
}

/// Elementwise [`weight`] over a batch of distances.
pub fn weights(radius: f32, distances: &[f32]) -> Vec<f32> {
    distances.iter().map(|&d| weight(radius, d)).collect()
}

/// Elementwise [`gradient_magnitude`] over a batch of distances.
pub fn gradient_magnitudes(radius: f32, distances: &[f32]) -> Vec<f32> {
    distances
        .iter()
        .map(|&d| gradient_magnitude(radius, d))
        .collect()
}
