// Re-export glam for convenience
pub use glam::*;

// Ray tracing math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{is_near_zero, luminance, reflect, refract, Color};
