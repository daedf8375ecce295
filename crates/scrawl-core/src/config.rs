//! Surface configuration.

use crate::style::StrokeStyle;
use crate::tool::ToolMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default erase hit-test threshold in CSS pixels.
pub const DEFAULT_ERASE_THRESHOLD: f64 = 10.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Options recognized by a [`StrokeSurface`](crate::surface::StrokeSurface).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Whether pointer input is accepted at all.
    pub active: bool,
    /// Current tool mode.
    pub mode: ToolMode,
    /// Style of ink strokes.
    pub ink: StrokeStyle,
    /// Style of the lasso preview.
    pub lasso: StrokeStyle,
    /// Maximum distance (exclusive) at which the eraser hits a stroke.
    pub erase_threshold: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            active: true,
            mode: ToolMode::Ink,
            ink: StrokeStyle::ink(),
            lasso: StrokeStyle::lasso(),
            erase_threshold: DEFAULT_ERASE_THRESHOLD,
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject widths, thresholds and dash patterns that cannot be drawn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.erase_threshold.is_finite() && self.erase_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "erase_threshold must be positive, got {}",
                self.erase_threshold
            )));
        }
        for (name, style) in [("ink", &self.ink), ("lasso", &self.lasso)] {
            if !(style.width.is_finite() && style.width > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} width must be positive, got {}",
                    style.width
                )));
            }
            if style.dash.iter().any(|d| !d.is_finite() || *d < 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} dash pattern must be non-negative"
                )));
            }
        }
        Ok(())
    }
}
