//! Run configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "width": 800, "height": 600, "surface_step": 0.02 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wire3d_core::edges::{CIRCLE_STEP, CURVE_STEP, SURFACE_STEP};
use wire3d_core::screen::{XRES, YRES};

use crate::error::{Result, ScriptError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Raster width in pixels.
    pub width: usize,
    /// Raster height in pixels.
    pub height: usize,
    /// Parameter step for `circle`.
    pub circle_step: f64,
    /// Parameter step for `bezier` and `hermite`.
    pub curve_step: f64,
    /// Grid step for `sphere` and `torus`.
    pub surface_step: f64,
    /// Terminal cells across used by `display` and `show`.
    pub preview_columns: u16,
    /// Terminal rows used by `display` and `show`; each row shows two pixel rows.
    pub preview_rows: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: XRES,
            height: YRES,
            circle_step: CIRCLE_STEP,
            curve_step: CURVE_STEP,
            surface_step: SURFACE_STEP,
            preview_columns: 100,
            preview_rows: 50,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ScriptError::Config(format!(
                "raster must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.preview_columns == 0 || self.preview_rows == 0 {
            return Err(ScriptError::Config("preview size must be non-zero".into()));
        }
        for (name, step) in [
            ("circle_step", self.circle_step),
            ("curve_step", self.curve_step),
            ("surface_step", self.surface_step),
        ] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ScriptError::Config(format!(
                    "{name} must be finite and positive, got {step}"
                )));
            }
        }
        Ok(())
    }
}
