// Re-export glam for convenience
pub use glam::*;

// Sable math types
mod interval;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use ray::Ray;

/// RGB color, linear, components typically in [0, 1].
pub type Color = Vec3;
