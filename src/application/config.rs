use std::env;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::SPEED_LEVEL_DEFAULT;
use crate::error::{LifeError, LifeResult};
use crate::rendering::RenderMode;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "LIFE_CONFIG";

/// Session configuration, loaded once at bootstrap.
///
/// ```json
/// { "columns": 120, "rows": 80, "speed_level": 90, "render_mode": "table" }
/// ```
///
/// Every field is optional; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    pub columns: usize,
    pub rows: usize,
    /// Pixel size of one cell in the canvas renderer
    pub cell_size: f32,
    /// Initial speed level (0-100, higher = faster); clamped
    pub speed_level: i32,
    /// Chance that a randomized cell starts alive
    pub alive_probability: f64,
    /// Pause the simulation when the user toggles a cell
    pub pause_on_toggle: bool,
    pub render_mode: String,
    /// Optional preset pattern name for the starting board instead of noise
    pub pattern: Option<String>,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 60,
            cell_size: 10.0,
            speed_level: i32::from(SPEED_LEVEL_DEFAULT),
            alive_probability: 0.25,
            pause_on_toggle: true,
            render_mode: "canvas".to_owned(),
            pattern: None,
            seed: None,
        }
    }
}

impl LifeConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> LifeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> LifeResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| LifeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config path from the first CLI argument, then `LIFE_CONFIG`;
    /// defaults when neither is given.
    pub fn from_env() -> LifeResult<Self> {
        let path = env::args().nth(1).or_else(|| env::var(CONFIG_ENV_VAR).ok());
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("No config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> LifeResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.columns, self.rows
            )));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(invalid(format!("cell_size must be positive, got {}", self.cell_size)));
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(invalid(format!(
                "alive_probability must be within [0, 1], got {}",
                self.alive_probability
            )));
        }
        self.render_mode()?;
        if let Some(name) = &self.pattern {
            if crate::domain::presets::find(name).is_none() {
                return Err(invalid(format!("unknown pattern '{name}'")));
            }
        }
        Ok(())
    }

    /// Configured render mode; unknown names are an error
    pub fn render_mode(&self) -> LifeResult<RenderMode> {
        self.render_mode.parse()
    }
}

fn invalid(reason: String) -> LifeError {
    LifeError::InvalidConfig { reason }
}
