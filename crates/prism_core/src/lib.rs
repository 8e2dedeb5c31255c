//! Prism Core - scene data and shading configuration.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Sphere`, and the fixed five-sphere `Scene`
//! - **Configuration**: `ShadingConfig`, the constants the shading pipeline reads
//!
//! # Example
//!
//! ```
//! use prism_core::{Scene, ShadingConfig};
//!
//! let scene = Scene::default();
//! let config = ShadingConfig::default();
//! assert_eq!(scene.spheres().len(), 5);
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod material;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use config::{ConfigError, ShadingConfig};
pub use material::{Color, Material};
pub use scene::{Scene, SceneError, OCCLUDER_COUNT, SPHERE_COUNT};
pub use sphere::Sphere;
