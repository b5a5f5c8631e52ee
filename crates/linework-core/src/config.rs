//! Editor configuration: visual policy for strokes and defaults for new shapes.

use crate::shapes::{CornerStyle, DEFAULT_COLOR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A stroke as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: u32,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: u32) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Editor-wide settings. Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Stroke applied to every shape of a selected group.
    pub highlight: Stroke,
    /// Stroke width of shapes that are not selected.
    pub normal_width: u32,
    /// Color for newly drawn shapes.
    pub default_color: String,
    /// Corner style for newly drawn rectangles.
    pub default_corner_style: CornerStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            highlight: Stroke::new("red", 2),
            normal_width: 1,
            default_color: DEFAULT_COLOR.to_string(),
            default_corner_style: CornerStyle::Square,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }
}
