/// Errors raised at the boundary of the fluid core.
///
/// Numeric degeneracies (coincident particles, near-zero densities) are not
/// errors; they contribute zero force instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SphError {
    /// Smoothing radius was zero, negative, or not finite.
    InvalidRadius(f32),
    /// A fixed key table of size zero was requested for a non-empty snapshot.
    InvalidTableSize,
    /// A fluid tunable was out of range; the message names it.
    InvalidConfig(&'static str),
}

impl std::fmt::Display for SphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SphError::InvalidRadius(r) => {
                write!(f, "smoothing radius must be positive and finite, got {}", r)
            }
            SphError::InvalidTableSize => write!(f, "grid table size must be non-zero"),
            SphError::InvalidConfig(msg) => write!(f, "invalid fluid config: {}", msg),
        }
    }
}

impl std::error::Error for SphError {}
