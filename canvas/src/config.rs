//! Game-level configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::error::EngineError;
use crate::geometry::Size;

/// Surface and debugging settings shared by every scene of a game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical surface width in CSS pixels.
    pub width: f64,
    /// Logical surface height in CSS pixels.
    pub height: f64,
    /// Device pixels per CSS pixel; the backing store is scaled by this.
    pub pixel_ratio: f64,
    /// Draw the debug overlay on every entity.
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { width: DEFAULT_SURFACE_WIDTH, height: DEFAULT_SURFACE_HEIGHT, pixel_ratio: 1.0, debug: false }
    }
}

impl GameConfig {
    /// Parse a JSON object; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the JSON is malformed or the values are invalid.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json).map_err(|e| EngineError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `Configuration` if a dimension or the pixel ratio is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in [("width", self.width), ("height", self.height), ("pixel_ratio", self.pixel_ratio)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::Configuration(format!("{field} must be a positive number, got {value}")));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
