//! Viewer settings loaded from JSON.

use std::path::{Path, PathBuf};

use prism_core::{ConfigError, ShadingConfig};
use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted frame width or height.
pub const MAX_DIMENSION: u32 = 16384;

/// Errors that can occur while loading viewer settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid shading override: {0}")]
    Shading(#[from] ConfigError),

    #[error("Invalid camera: {0}")]
    Camera(String),
}

/// Movement keys of the fly camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    #[serde(rename = "w")]
    Forward,
    #[serde(rename = "s")]
    Backward,
    #[serde(rename = "a")]
    Left,
    #[serde(rename = "d")]
    Right,
}

/// Input recorded for one display tick.
///
/// Keys held during the tick are applied first, then the cursor position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputStep {
    /// Absolute cursor position in window pixels
    pub cursor: Option<[f32; 2]>,
    pub keys: Vec<MoveKey>,
    /// New window size
    pub resize: Option<[u32; 2]>,
}

/// Host settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub width: u32,
    pub height: u32,
    /// Directory that frames are written to
    pub output_dir: PathBuf,
    pub camera_position: Vec3,
    pub camera_front: Vec3,
    /// World units per movement step
    pub move_speed: f32,
    /// Degrees per pixel of cursor movement
    pub mouse_sensitivity: f32,
    /// Replaces the built-in shading constants when present
    pub shading: Option<ShadingConfig>,
    pub steps: Vec<InputStep>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            output_dir: PathBuf::from("frames"),
            camera_position: Vec3::ZERO,
            camera_front: Vec3::NEG_Z,
            move_speed: 0.05,
            mouse_sensitivity: 0.1,
            shading: None,
            steps: Vec::new(),
        }
    }
}

impl ViewerSettings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, or use the defaults if there is no file.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::warn!("Settings file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Check the settings can drive a render.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&self.width) || !valid.contains(&self.height) {
            return Err(SettingsError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(shading) = &self.shading {
            shading.validate()?;
        }
        if !self.camera_front.is_finite() || self.camera_front.length_squared() < 1e-12 {
            return Err(SettingsError::Camera(format!(
                "front {:?} has no direction",
                self.camera_front
            )));
        }
        if !self.camera_position.is_finite() {
            return Err(SettingsError::Camera(format!(
                "position {:?} is not finite",
                self.camera_position
            )));
        }
        Ok(())
    }

    /// Shading configuration to render with.
    pub fn shading_config(&self) -> ShadingConfig {
        self.shading.unwrap_or_default()
    }
}
