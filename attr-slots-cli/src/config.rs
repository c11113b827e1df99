//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
///
/// Every section is optional; missing sections fall back to the defaults of
/// the built-in demonstrations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub callback: CallbackConfig,
    #[serde(default)]
    pub point: PointConfig,
    #[serde(default)]
    pub circle: CircleConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CallbackConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub start_x: i64,
    #[serde(default)]
    pub start_y: i64,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            start_x: 0,
            start_y: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PointConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CircleConfig {
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Print instance snapshots as JSON instead of text
    #[serde(default)]
    pub json: bool,
}

fn default_iterations() -> usize {
    100
}

fn default_radius() -> f64 {
    4.0
}

/// Configuration values that parse but make no sense
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("circle radius must be a finite, non-negative number (got {0})")]
    InvalidRadius(f64),

    #[error("point coordinates overflow after {0} iterations")]
    PointOverflow(usize),

    #[error("callback operands overflow i64 (start_x = {start_x}, start_y = {start_y}, iterations = {iterations})")]
    CallbackOverflow {
        start_x: i64,
        start_y: i64,
        iterations: usize,
    },
}

impl AppConfig {
    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let r = self.circle.radius;
        if !r.is_finite() || r < 0.0 {
            return Err(ConfigError::InvalidRadius(r));
        }
        // The point demo writes num + 1 for every num < iterations
        if i64::try_from(self.point.iterations).is_err() {
            return Err(ConfigError::PointOverflow(self.point.iterations));
        }
        if !self.callback.fits_i64() {
            return Err(ConfigError::CallbackOverflow {
                start_x: self.callback.start_x,
                start_y: self.callback.start_y,
                iterations: self.callback.iterations,
            });
        }
        Ok(())
    }
}

impl CallbackConfig {
    /// Whether every operand and every sum of the callback demo fits in i64
    ///
    /// Operands grow by one per call, so checking the first and last call
    /// covers the whole run.
    fn fits_i64(&self) -> bool {
        let Some(last_step) = self.iterations.checked_sub(1) else {
            return true;
        };
        let in_range = |v: i128| v >= i128::from(i64::MIN) && v <= i128::from(i64::MAX);
        let (x0, y0) = (i128::from(self.start_x), i128::from(self.start_y));
        let step = last_step as i128;
        in_range(x0 + step) && in_range(y0 + step) && in_range(x0 + y0) && in_range(x0 + y0 + 2 * step)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
