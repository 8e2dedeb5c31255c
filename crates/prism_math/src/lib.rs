// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod ray;
mod shading;

pub use interval::Interval;
pub use ray::Ray;
pub use shading::{mix, reflect, smoothstep};
